//! Parser for query files
//!
//! Loads and validates the ordered query list from YAML or JSON.

use crate::error::{Error, Result};
use crate::loader::types::{QueriesDocument, Query};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load the ordered query list from a YAML or JSON file
pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read queries file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_queries_from_str(&content)
}

/// Load the ordered query list from a YAML or JSON string
///
/// JSON is accepted because every JSON document is also valid YAML.
pub fn load_queries_from_str(content: &str) -> Result<Vec<Query>> {
    let doc: QueriesDocument = serde_yaml::from_str(content)
        .map_err(|e| Error::config(format!("Failed to parse queries: {e}")))?;

    let queries = doc.into_queries();
    validate_queries(&queries)?;
    Ok(queries)
}

/// Validate a query list
fn validate_queries(queries: &[Query]) -> Result<()> {
    if queries.is_empty() {
        return Err(Error::config("At least one query is required"));
    }

    let mut seen = HashSet::new();
    for (index, query) in queries.iter().enumerate() {
        if query.ref_id.is_empty() {
            return Err(Error::config(format!(
                "Query at position {index} has an empty refId"
            )));
        }
        if !seen.insert(query.ref_id.as_str()) {
            return Err(Error::config(format!(
                "Duplicate refId '{}'",
                query.ref_id
            )));
        }
    }

    Ok(())
}

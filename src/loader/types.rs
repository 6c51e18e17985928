//! Loader types
//!
//! Query descriptors as supplied by the query-execution layer.

use serde::{Deserialize, Serialize};

// ============================================================================
// Query
// ============================================================================

/// One submitted query, in the order it was sent to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Caller-assigned identifier used as the result-map key
    #[serde(alias = "ref_id")]
    pub ref_id: String,
    /// Display-name pattern, empty for the default naming
    #[serde(default)]
    pub alias: String,
    /// Measurement substituted for `$m` / `[[measurement]]`
    #[serde(default)]
    pub measurement: String,
    /// Raw InfluxQL text sent to the engine
    #[serde(default, alias = "query", alias = "raw_query")]
    pub raw_query: String,
}

impl Query {
    /// Create a query with a ref id
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Default::default()
        }
    }

    /// Set the alias pattern
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Set the measurement
    #[must_use]
    pub fn with_measurement(mut self, measurement: impl Into<String>) -> Self {
        self.measurement = measurement.into();
        self
    }

    /// Set the raw query text
    #[must_use]
    pub fn with_raw_query(mut self, raw_query: impl Into<String>) -> Self {
        self.raw_query = raw_query.into();
        self
    }

    /// Whether the raw query lists tag values (`SHOW TAG VALUES ...`)
    pub fn is_show_tag_values(&self) -> bool {
        self.raw_query.to_lowercase().contains("show tag values")
    }
}

// ============================================================================
// Queries File
// ============================================================================

/// Accepted layouts of a queries file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum QueriesDocument {
    /// A bare list of queries
    List(Vec<Query>),
    /// `queries:` wrapping a list
    Wrapped { queries: Vec<Query> },
}

impl QueriesDocument {
    pub(crate) fn into_queries(self) -> Vec<Query> {
        match self {
            QueriesDocument::List(queries) | QueriesDocument::Wrapped { queries } => queries,
        }
    }
}

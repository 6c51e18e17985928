//! Parser configuration
//!
//! Settings that control how a response body is turned into frames.
//! Every field has a default, so an empty YAML document is a valid config.

use crate::error::{Error, Result};
use crate::types::Precision;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ref id used when an error cannot be attributed to a single query
pub const DEFAULT_SENTINEL_REF_ID: &str = "A";

/// Configuration for [`ResponseParser`](crate::response::ResponseParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParserConfig {
    /// Result-map key for decode failures and engine-wide errors
    #[serde(default = "default_sentinel_ref_id")]
    pub sentinel_ref_id: String,

    /// Unit of the epoch timestamps in the `time` column
    #[serde(default)]
    pub timestamp_precision: Precision,
}

fn default_sentinel_ref_id() -> String {
    DEFAULT_SENTINEL_REF_ID.to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sentinel_ref_id: default_sentinel_ref_id(),
            timestamp_precision: Precision::default(),
        }
    }
}

impl ParserConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentinel ref id
    #[must_use]
    pub fn with_sentinel_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.sentinel_ref_id = ref_id.into();
        self
    }

    /// Set the timestamp precision
    #[must_use]
    pub fn with_timestamp_precision(mut self, precision: Precision) -> Self {
        self.timestamp_precision = precision;
        self
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.sentinel_ref_id.is_empty() {
            return Err(Error::config("sentinel_ref_id cannot be empty"));
        }
        Ok(())
    }
}

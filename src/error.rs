//! Error types for influxql-frames
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for influxql-frames
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("{message}")]
    Engine { message: String },

    #[error("{message}")]
    Query { message: String },

    // ============================================================================
    // Value Conversion Errors
    // ============================================================================
    #[error("Cannot convert '{literal}' to a 64-bit float")]
    NumberConversion { literal: String },

    #[error("Invalid timestamp: {message}")]
    Timestamp { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an error reported by the query engine for the whole response
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Create an error reported for a single query
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a number conversion error
    pub fn number_conversion(literal: impl Into<String>) -> Self {
        Self::NumberConversion {
            literal: literal.into(),
        }
    }

    /// Create a timestamp error
    pub fn timestamp(message: impl Into<String>) -> Self {
        Self::Timestamp {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole response rather than one query
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Engine { .. })
    }
}

/// Result type alias for influxql-frames
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::decode("unexpected end of input");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: unexpected end of input"
        );

        // Engine and query errors carry the engine's message verbatim
        let err = Error::engine("database not found: mydb");
        assert_eq!(err.to_string(), "database not found: mydb");

        let err = Error::query("error parsing query: found EOF");
        assert_eq!(err.to_string(), "error parsing query: found EOF");

        let err = Error::number_conversion("1e400");
        assert_eq!(err.to_string(), "Cannot convert '1e400' to a 64-bit float");
    }

    #[test]
    fn test_is_fatal() {
        assert!(Error::decode("bad").is_fatal());
        assert!(Error::engine("bad").is_fatal());

        assert!(!Error::query("bad").is_fatal());
        assert!(!Error::timestamp("bad").is_fatal());
        assert!(!Error::config("bad").is_fatal());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.with_context(|| "outer".to_string());
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}

//! Common types used throughout influxql-frames
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Series-level tag set, ordered by key
pub type Tags = BTreeMap<String, String>;

// ============================================================================
// Timestamp Precision
// ============================================================================

/// Unit of the epoch timestamps returned by the query engine
///
/// Time fields are stored in milliseconds, or in this unit when it is finer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Precision {
    /// Whole seconds (the engine is queried with `epoch=s`)
    #[default]
    #[serde(rename = "s")]
    Seconds,
    /// Milliseconds
    #[serde(rename = "ms")]
    Milliseconds,
    /// Microseconds
    #[serde(rename = "us", alias = "u")]
    Microseconds,
    /// Nanoseconds
    #[serde(rename = "ns")]
    Nanoseconds,
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_default() {
        assert_eq!(Precision::default(), Precision::Seconds);
    }

    #[test]
    fn test_precision_serde() {
        let p: Precision = serde_yaml::from_str("ms").unwrap();
        assert_eq!(p, Precision::Milliseconds);

        let p: Precision = serde_yaml::from_str("u").unwrap();
        assert_eq!(p, Precision::Microseconds);

        assert_eq!(serde_json::to_string(&Precision::Nanoseconds).unwrap(), "\"ns\"");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
    }
}

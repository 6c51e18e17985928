//! Decoder types and traits
//!
//! Defines the raw response shape returned by the query engine and the
//! scalar values found inside series rows.

use crate::error::{Error, Result};
use crate::types::Tags;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::fmt;
use std::io::Read;

// ============================================================================
// Response Shape
// ============================================================================

/// Top-level body returned by the query engine
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    /// Engine-wide error; when set, `results` is not interpreted
    #[serde(default)]
    pub error: Option<String>,
    /// One result per submitted statement, in submission order
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawResult>,
}

impl RawResponse {
    /// The engine-wide error, if one was reported
    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

/// Result of a single statement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    /// Statement index assigned by the engine
    #[serde(default)]
    pub statement_id: Option<u64>,
    /// Statement-level error
    #[serde(default)]
    pub error: Option<String>,
    /// Series returned by the statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<Row>,
}

impl RawResult {
    /// The statement-level error, if one was reported
    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

/// One named series
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    /// Measurement or series name
    #[serde(default)]
    pub name: String,
    /// Column labels, in value-tuple order
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<String>,
    /// Series-level tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Tags,
    /// Value tuples, one entry per column
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<Vec<Scalar>>,
}

impl Row {
    /// Create an empty row with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the column labels
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Append a value tuple
    #[must_use]
    pub fn with_values(mut self, values: Vec<Scalar>) -> Self {
        self.values.push(values);
        self
    }

    /// Position of a column label, if present
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Scalar Values
// ============================================================================

/// A numeric literal kept exactly as it appeared in the response body
///
/// Conversion to a machine number only happens on demand, so large
/// integers (nanosecond timestamps, counters) never pass through an
/// intermediate lossy representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberLiteral(String);

impl NumberLiteral {
    /// Wrap literal text; validity is only checked on conversion
    pub fn new(literal: impl Into<String>) -> Self {
        Self(literal.into())
    }

    /// The original literal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the nearest 64-bit float
    ///
    /// Fails for text that is not a number and for values outside the
    /// finite `f64` range.
    pub fn to_f64(&self) -> Result<f64> {
        match self.0.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::number_conversion(&self.0)),
        }
    }
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for NumberLiteral {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for NumberLiteral {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

/// A single cell of a value tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON `null`
    Null,
    /// Any JSON number, unconverted
    Number(NumberLiteral),
    /// JSON string
    String(String),
    /// JSON boolean
    Bool(bool),
    /// Nested array or object, kept as raw JSON text
    Other(String),
}

impl Scalar {
    /// Classify a single JSON value from its raw text
    pub fn from_json_text(text: &str) -> Self {
        let text = text.trim();
        match text.as_bytes().first() {
            None | Some(b'n') => Scalar::Null,
            Some(b't') => Scalar::Bool(true),
            Some(b'f') => Scalar::Bool(false),
            Some(b'"') => serde_json::from_str::<String>(text)
                .map_or_else(|_| Scalar::Other(text.to_string()), Scalar::String),
            Some(b'-' | b'0'..=b'9') => Scalar::Number(NumberLiteral::new(text)),
            Some(_) => Scalar::Other(text.to_string()),
        }
    }

    /// Whether this is JSON `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// The numeric literal, if this is a number
    pub fn as_number(&self) -> Option<&NumberLiteral> {
        match self {
            Scalar::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form for string-typed output; `None` for null
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Number(n) => Some(n.as_str().to_string()),
            Scalar::String(s) => Some(s.clone()),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Other(raw) => Some(raw.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Scalar::from_json_text(raw.get()))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

// ============================================================================
// Decoder Trait
// ============================================================================

/// Trait for decoding response bodies into a [`RawResponse`]
pub trait ResponseDecoder: Send + Sync {
    /// Decode a response body from a reader
    fn decode_reader(&self, reader: &mut dyn Read) -> Result<RawResponse>;

    /// Decode a response body held in memory
    fn decode_slice(&self, body: &[u8]) -> Result<RawResponse> {
        let mut reader = body;
        self.decode_reader(&mut reader)
    }

    /// Decode a response body from a string
    fn decode_str(&self, body: &str) -> Result<RawResponse> {
        self.decode_slice(body.as_bytes())
    }
}

//! Response types
//!
//! The per-query result map handed back to callers.

use crate::error::{Error, Result};
use crate::output::{frames_to_json, Frame};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Outcome of a single query
#[derive(Debug)]
pub enum DataResponse {
    /// Frames produced from the query's series, in row order
    Frames(Vec<Frame>),
    /// The query (or the whole response) failed
    Error(Error),
}

impl DataResponse {
    /// Frames of a successful query; empty for errors
    pub fn frames(&self) -> &[Frame] {
        match self {
            DataResponse::Frames(frames) => frames,
            DataResponse::Error(_) => &[],
        }
    }

    /// The error, if the query failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            DataResponse::Frames(_) => None,
            DataResponse::Error(e) => Some(e),
        }
    }

    /// Whether the query failed
    pub fn is_error(&self) -> bool {
        matches!(self, DataResponse::Error(_))
    }

    /// Render as JSON: `{"frames": [...]}` or `{"error": "..."}`
    pub fn to_json(&self) -> Result<Value> {
        match self {
            DataResponse::Frames(frames) => Ok(json!({ "frames": frames_to_json(frames)? })),
            DataResponse::Error(e) => Ok(json!({ "error": e.to_string() })),
        }
    }
}

impl From<Result<Vec<Frame>>> for DataResponse {
    fn from(result: Result<Vec<Frame>>) -> Self {
        match result {
            Ok(frames) => DataResponse::Frames(frames),
            Err(e) => DataResponse::Error(e),
        }
    }
}

/// Results keyed by query ref id
#[derive(Debug, Default)]
pub struct QueryDataResponse {
    /// One entry per ref id
    pub responses: BTreeMap<String, DataResponse>,
}

impl QueryDataResponse {
    /// Create an empty result map
    pub fn new() -> Self {
        Self::default()
    }

    /// Result map holding a single error
    pub fn single_error(ref_id: impl Into<String>, error: Error) -> Self {
        let mut response = Self::new();
        response.insert(ref_id, DataResponse::Error(error));
        response
    }

    /// Set the outcome for a ref id
    pub fn insert(&mut self, ref_id: impl Into<String>, response: DataResponse) {
        self.responses.insert(ref_id.into(), response);
    }

    /// Outcome for a ref id
    pub fn get(&self, ref_id: &str) -> Option<&DataResponse> {
        self.responses.get(ref_id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Iterate entries in ref id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataResponse)> {
        self.responses.iter().map(|(k, v)| (k.as_str(), v))
    }
}

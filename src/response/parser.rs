//! Response parser
//!
//! Pairs each statement result with the query that produced it and fans
//! errors out to the right ref id.

use super::types::{DataResponse, QueryDataResponse};
use crate::config::ParserConfig;
use crate::decode::{JsonResponseDecoder, RawResponse, ResponseDecoder};
use crate::error::Error;
use crate::loader::Query;
use crate::transform::RowTransformer;
use std::io::Read;
use tracing::{debug, warn};

/// Turns a raw response body into per-query frames
///
/// Holds no state besides its configuration and can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    config: ParserConfig,
    decoder: JsonResponseDecoder,
}

impl ResponseParser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given config
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            decoder: JsonResponseDecoder::new(),
        }
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decode a response body and build frames for every query
    ///
    /// `queries` must be in the order the statements were sent, so that
    /// `results[i]` belongs to `queries[i]`.
    pub fn parse(&self, reader: &mut dyn Read, queries: &[Query]) -> QueryDataResponse {
        match self.decoder.decode_reader(reader) {
            Ok(response) => self.parse_response(&response, queries),
            Err(e) => {
                warn!(error = %e, "failed to decode query response");
                QueryDataResponse::single_error(&self.config.sentinel_ref_id, e)
            }
        }
    }

    /// [`parse`](Self::parse) over an in-memory body
    pub fn parse_slice(&self, body: &[u8], queries: &[Query]) -> QueryDataResponse {
        let mut reader = body;
        self.parse(&mut reader, queries)
    }

    /// [`parse`](Self::parse) over a string body
    pub fn parse_str(&self, body: &str, queries: &[Query]) -> QueryDataResponse {
        self.parse_slice(body.as_bytes(), queries)
    }

    /// Build frames from an already decoded response
    pub fn parse_response(&self, response: &RawResponse, queries: &[Query]) -> QueryDataResponse {
        if let Some(message) = response.error_message() {
            return QueryDataResponse::single_error(
                &self.config.sentinel_ref_id,
                Error::engine(message),
            );
        }

        if response.results.len() != queries.len() {
            warn!(
                results = response.results.len(),
                queries = queries.len(),
                "result count does not match query count; unmatched entries are ignored"
            );
        }

        let transformer = RowTransformer::new(self.config.timestamp_precision);
        let mut out = QueryDataResponse::new();

        for (result, query) in response.results.iter().zip(queries) {
            let data = match result.error_message() {
                Some(message) => DataResponse::Error(Error::query(message)),
                None => transformer.transform_rows(&result.series, query).into(),
            };

            debug!(
                ref_id = %query.ref_id,
                frames = data.frames().len(),
                error = data.is_error(),
                "parsed query result"
            );
            out.insert(query.ref_id.clone(), data);
        }

        out
    }
}

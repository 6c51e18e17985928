//! Decoder implementations

use super::types::{RawResponse, ResponseDecoder};
use crate::error::{Error, Result};
use std::io::{BufReader, Read};

/// JSON decoder for query engine responses
///
/// Reads the first JSON document from the stream and ignores anything
/// after it, matching how the engine's HTTP responses are consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseDecoder;

impl JsonResponseDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl ResponseDecoder for JsonResponseDecoder {
    fn decode_reader(&self, reader: &mut dyn Read) -> Result<RawResponse> {
        let reader = BufReader::new(reader);
        let mut documents = serde_json::Deserializer::from_reader(reader).into_iter::<RawResponse>();

        match documents.next() {
            Some(Ok(response)) => Ok(response),
            Some(Err(e)) => Err(Error::decode(e.to_string())),
            None => Err(Error::decode("empty response body")),
        }
    }
}

/// Decode a response body with the default JSON decoder
pub fn decode_response(reader: &mut dyn Read) -> Result<RawResponse> {
    JsonResponseDecoder::new().decode_reader(reader)
}

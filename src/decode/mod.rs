//! Response decoder module
//!
//! # Overview
//!
//! Decodes the query engine's JSON body into a [`RawResponse`]. Numeric
//! cells are kept as [`NumberLiteral`]s carrying their original text, so
//! the later conversion to `f64` is a single, exact parse.

mod decoders;
mod types;

pub use decoders::{decode_response, JsonResponseDecoder};
pub use types::{NumberLiteral, RawResponse, RawResult, ResponseDecoder, Row, Scalar};

#[cfg(test)]
mod tests;

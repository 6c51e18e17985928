//! Response dispatch module
//!
//! # Overview
//!
//! - A body that cannot be decoded, or that carries an engine-wide error,
//!   yields a single error under the sentinel ref id.
//! - Otherwise every statement result is matched to its query by position.
//!   A failed statement only affects its own ref id.

mod parser;
mod types;

pub use parser::ResponseParser;
pub use types::{DataResponse, QueryDataResponse};

#[cfg(test)]
mod tests;

//! Query loader module
//!
//! Parse query descriptors from YAML or JSON files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `Query` - The per-query context used while building frames
//! - File and string loaders with validation

mod parser;
mod types;

pub use parser::{load_queries, load_queries_from_str};
pub use types::Query;

#[cfg(test)]
mod tests;

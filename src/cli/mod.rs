//! CLI module
//!
//! Command-line interface for turning saved responses into frames.
//!
//! # Commands
//!
//! - `parse` - Parse a response body against its queries
//! - `validate` - Check a queries file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

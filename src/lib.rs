// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # influxql-frames
//!
//! Turns the JSON body returned by an InfluxDB 1.x (InfluxQL) query into
//! named, typed data frames backed by Apache Arrow.
//!
//! ## Features
//!
//! - **Exact numbers**: numeric cells keep their literal text until they are
//!   converted, so large timestamps and counters are never rounded twice
//! - **Two row shapes**: time series (`time` column) and flat listings such as
//!   `SHOW TAG VALUES`
//! - **Gaps, not zeros**: `null` and malformed cells become missing values
//! - **Alias patterns**: `$col`, `[[m]]`, `[[tag_host]]`, `[[1]]` display names
//! - **Arrow output**: every frame is a `RecordBatch`, writable to Parquet
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use influxql_frames::{Query, ResponseParser};
//!
//! let queries = vec![Query::new("A").with_alias("$tag_host")];
//! let response = ResponseParser::new().parse_str(body, &queries);
//!
//! for (ref_id, data) in response.iter() {
//!     for frame in data.frames() {
//!         println!("{ref_id}: {} ({} rows)", frame.name(), frame.num_rows());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! bytes ──► decode ──► response ──► transform ──► output::Frame
//!           RawResponse  per-query     per row        │
//!                        dispatch        │            ▼
//!                                        └──► template (display names)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Parser configuration
pub mod config;

/// Response body decoding
pub mod decode;

/// Query descriptors and their loader
pub mod loader;

/// Display-name templating
pub mod template;

/// Row to frame transformation
pub mod transform;

/// Per-query dispatch of a decoded response
pub mod response;

/// Frames, JSON rendering and Parquet output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use loader::Query;
pub use output::Frame;
pub use response::{DataResponse, QueryDataResponse, ResponseParser};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

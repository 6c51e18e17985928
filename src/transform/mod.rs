//! Row transformation module
//!
//! # Overview
//!
//! Each series row becomes one or more frames:
//! - Rows with a `time` column are time series; every other column
//!   becomes its own `time` + `value` frame.
//! - Rows without one are flat listings and become a single string frame.
//!
//! Malformed cells never fail a query. A tuple whose timestamp cannot be
//! parsed is dropped from the frame, and a value that is not a usable
//! number becomes a gap.

mod coerce;
mod rows;

pub use coerce::{parse_timestamp, parse_value};
pub use rows::RowTransformer;

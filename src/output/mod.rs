//! Output module
//!
//! Frames and everything that turns them into something else.
//!
//! # Overview
//!
//! This module provides:
//! - `Frame` - A named Arrow RecordBatch with labels and query metadata
//! - JSON rendering of frames
//! - Parquet file writing

mod frame;
mod json;
mod writer;

pub use frame::{
    Frame, TimeSeries, DISPLAY_NAME_KEY, EXECUTED_QUERY_KEY, LABELS_KEY, TIME_FIELD, VALUE_FIELD,
};
pub use json::{frame_to_json, frames_to_json};
pub use writer::{write_frame_to_parquet, write_frames_to_dir, ParquetWriter, ParquetWriterConfig};

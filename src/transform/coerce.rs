//! Cell coercion
//!
//! Turns raw cells into timestamps and optional floats. Failures here are
//! reported as errors to the caller, which decides whether to drop the
//! tuple or record a gap.

use crate::decode::Scalar;
use crate::error::{Error, Result};
use crate::types::Precision;
use chrono::{DateTime, Utc};

/// Parse an epoch timestamp cell
///
/// The cell must be a numeric literal. It is converted to `f64`, truncated
/// toward zero and read in the given precision.
pub fn parse_timestamp(value: &Scalar, precision: Precision) -> Result<DateTime<Utc>> {
    let number = value
        .as_number()
        .ok_or_else(|| Error::timestamp(format!("timestamp-value has invalid type: {value:?}")))?;
    let epoch = number.to_f64()? as i64;

    let instant = match precision {
        Precision::Seconds => DateTime::from_timestamp(epoch, 0),
        Precision::Milliseconds => DateTime::from_timestamp_millis(epoch),
        Precision::Microseconds => DateTime::from_timestamp_micros(epoch),
        Precision::Nanoseconds => Some(DateTime::from_timestamp_nanos(epoch)),
    };

    instant.ok_or_else(|| Error::timestamp(format!("{number} is out of range")))
}

/// Coerce a value cell to an optional float
///
/// JSON `null` is a gap, not zero. Cells that are not numbers, and numbers
/// outside the `f64` range, are also gaps: non-numeric series are not
/// supported on this path.
pub fn parse_value(value: &Scalar) -> Option<f64> {
    value.as_number()?.to_f64().ok()
}

//! Arrow-backed data frames
//!
//! A [`Frame`] is a named Arrow `RecordBatch`. Per-field labels and the
//! display name live in the Arrow field metadata, the executed query in the
//! schema metadata, so the batch stays self-describing when written out.

use crate::error::{Error, Result};
use crate::types::{Precision, Tags};
use arrow::array::{
    Array, ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the time field in time-series frames
pub const TIME_FIELD: &str = "time";

/// Name of the value field in every frame
pub const VALUE_FIELD: &str = "value";

/// Field metadata key holding the series tags as a JSON object
pub const LABELS_KEY: &str = "labels";

/// Field metadata key holding the resolved display name
pub const DISPLAY_NAME_KEY: &str = "displayNameFromDS";

/// Schema metadata key holding the raw query text
pub const EXECUTED_QUERY_KEY: &str = "executedQueryString";

/// Timezone attached to the time field
const UTC: &str = "UTC";

/// A named, typed table produced from one series row
#[derive(Debug, Clone)]
pub struct Frame {
    name: String,
    batch: RecordBatch,
}

/// Time-indexed numeric samples, kept in lock-step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Sample instants
    pub times: Vec<DateTime<Utc>>,
    /// Sample values; `None` marks a gap
    pub values: Vec<Option<f64>>,
    /// Resolution the instants were read at
    pub precision: Precision,
}

impl TimeSeries {
    /// Create an empty series with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            precision: Precision::default(),
        }
    }

    /// Set the resolution the instants were read at
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Append one sample
    pub fn push(&mut self, time: DateTime<Utc>, value: Option<f64>) {
        self.times.push(time);
        self.values.push(value);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl Frame {
    /// Wrap an existing record batch
    pub fn from_batch(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Build a single-field frame of strings (`null` entries allowed)
    pub fn string_values(name: impl Into<String>, values: Vec<Option<String>>) -> Result<Self> {
        let schema = Schema::new(vec![Field::new(VALUE_FIELD, DataType::Utf8, true)]);
        let column: ArrayRef = Arc::new(StringArray::from(values));
        let batch = RecordBatch::try_new(Arc::new(schema), vec![column])?;
        Ok(Self::from_batch(name, batch))
    }

    /// Build a `time` + `value` frame
    ///
    /// The value field carries `labels` and `display_name`; the frame is
    /// named after `display_name` and records `executed_query`. The time
    /// field is stored in milliseconds, or in the series precision when that
    /// is finer.
    pub fn time_series(
        series: TimeSeries,
        labels: &Tags,
        display_name: &str,
        executed_query: &str,
    ) -> Result<Self> {
        if series.times.len() != series.values.len() {
            return Err(Error::output(format!(
                "time and value lengths differ: {} vs {}",
                series.times.len(),
                series.values.len()
            )));
        }

        let field_metadata = HashMap::from([
            (LABELS_KEY.to_string(), serde_json::to_string(labels)?),
            (DISPLAY_NAME_KEY.to_string(), display_name.to_string()),
        ]);
        let schema_metadata =
            HashMap::from([(EXECUTED_QUERY_KEY.to_string(), executed_query.to_string())]);

        let unit = time_unit(series.precision);
        let schema = Schema::new(vec![
            Field::new(
                TIME_FIELD,
                DataType::Timestamp(unit, Some(UTC.into())),
                false,
            ),
            Field::new(VALUE_FIELD, DataType::Float64, true).with_metadata(field_metadata),
        ])
        .with_metadata(schema_metadata);

        let times = time_array(&series.times, unit)?;
        let values: ArrayRef = Arc::new(Float64Array::from(series.values));

        let batch = RecordBatch::try_new(Arc::new(schema), vec![times, values])?;
        Ok(Self::from_batch(display_name, batch))
    }

    /// Frame name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying record batch
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Field names, in order
    pub fn field_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Raw query text recorded on the frame, if any
    pub fn executed_query_string(&self) -> Option<String> {
        self.batch.schema().metadata().get(EXECUTED_QUERY_KEY).cloned()
    }

    /// Display name of a field, if one was set
    pub fn display_name(&self, field: &str) -> Option<String> {
        let schema = self.batch.schema();
        let field = schema.field_with_name(field).ok()?;
        field.metadata().get(DISPLAY_NAME_KEY).cloned()
    }

    /// Labels of a field; empty when the field has none
    pub fn labels(&self, field: &str) -> Result<Tags> {
        let schema = self.batch.schema();
        let field = schema
            .field_with_name(field)
            .map_err(|_| Error::output(format!("no field named '{field}'")))?;

        match field.metadata().get(LABELS_KEY) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Tags::new()),
        }
    }

    /// Values of a string field
    pub fn strings(&self, field: &str) -> Option<Vec<Option<String>>> {
        let array = self.batch.column_by_name(field)?;
        let array = array.as_any().downcast_ref::<StringArray>()?;
        Some(array.iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Values of a float field
    pub fn floats(&self, field: &str) -> Option<Vec<Option<f64>>> {
        let array = self.batch.column_by_name(field)?;
        let array = array.as_any().downcast_ref::<Float64Array>()?;
        Some(array.iter().collect())
    }

    /// Values of a time field
    pub fn times(&self, field: &str) -> Option<Vec<DateTime<Utc>>> {
        let array = self.batch.column_by_name(field)?;
        match array.data_type() {
            DataType::Timestamp(TimeUnit::Millisecond, _) => array
                .as_any()
                .downcast_ref::<TimestampMillisecondArray>()?
                .values()
                .iter()
                .map(|v| DateTime::from_timestamp_millis(*v))
                .collect(),
            DataType::Timestamp(TimeUnit::Microsecond, _) => array
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()?
                .values()
                .iter()
                .map(|v| DateTime::from_timestamp_micros(*v))
                .collect(),
            DataType::Timestamp(TimeUnit::Nanosecond, _) => Some(
                array
                    .as_any()
                    .downcast_ref::<TimestampNanosecondArray>()?
                    .values()
                    .iter()
                    .map(|v| DateTime::from_timestamp_nanos(*v))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Arrow unit of the time field for a source precision
fn time_unit(precision: Precision) -> TimeUnit {
    match precision {
        Precision::Seconds | Precision::Milliseconds => TimeUnit::Millisecond,
        Precision::Microseconds => TimeUnit::Microsecond,
        Precision::Nanoseconds => TimeUnit::Nanosecond,
    }
}

fn time_array(times: &[DateTime<Utc>], unit: TimeUnit) -> Result<ArrayRef> {
    let array: ArrayRef = match unit {
        TimeUnit::Microsecond => {
            let micros: Vec<i64> = times.iter().map(DateTime::timestamp_micros).collect();
            Arc::new(TimestampMicrosecondArray::from(micros).with_timezone(UTC))
        }
        TimeUnit::Nanosecond => {
            let nanos = times
                .iter()
                .map(|t| {
                    t.timestamp_nanos_opt()
                        .ok_or_else(|| Error::output(format!("{t} cannot be stored in nanoseconds")))
                })
                .collect::<Result<Vec<i64>>>()?;
            Arc::new(TimestampNanosecondArray::from(nanos).with_timezone(UTC))
        }
        _ => {
            let millis: Vec<i64> = times.iter().map(DateTime::timestamp_millis).collect();
            Arc::new(TimestampMillisecondArray::from(millis).with_timezone(UTC))
        }
    };
    Ok(array)
}

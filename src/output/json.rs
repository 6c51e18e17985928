//! Frame to JSON rendering
//!
//! Renders frames in a columnar layout: field descriptors (name, type,
//! labels, display name) followed by one value array per field.

use super::frame::{Frame, DISPLAY_NAME_KEY, LABELS_KEY};
use crate::error::{Error, Result};
use arrow::array::{
    Array, Float64Array, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray,
};
use arrow::datatypes::{DataType, Field, TimeUnit};
use serde_json::{json, Value};

/// Render a frame as JSON
pub fn frame_to_json(frame: &Frame) -> Result<Value> {
    let batch = frame.batch();
    let schema = batch.schema();

    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut values = Vec::with_capacity(schema.fields().len());

    for (index, field) in schema.fields().iter().enumerate() {
        fields.push(field_to_json(field)?);
        values.push(Value::Array(column_to_json(batch.column(index).as_ref())?));
    }

    let mut rendered = json!({
        "name": frame.name(),
        "fields": fields,
        "values": values,
    });
    if let Some(query) = frame.executed_query_string() {
        rendered["meta"] = json!({ "executedQueryString": query });
    }

    Ok(rendered)
}

/// Render every frame of a query
pub fn frames_to_json(frames: &[Frame]) -> Result<Value> {
    let rendered: Result<Vec<Value>> = frames.iter().map(frame_to_json).collect();
    Ok(Value::Array(rendered?))
}

/// Describe a field
fn field_to_json(field: &Field) -> Result<Value> {
    let mut rendered = json!({
        "name": field.name(),
        "type": type_name(field.data_type()),
    });

    if let Some(labels) = field.metadata().get(LABELS_KEY) {
        rendered["labels"] = serde_json::from_str(labels)?;
    }

    if let Some(display_name) = field.metadata().get(DISPLAY_NAME_KEY) {
        rendered["config"] = json!({ "displayNameFromDS": display_name });
    }

    Ok(rendered)
}

/// Field type as shown to consumers
fn type_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Timestamp(_, _) => "time",
        DataType::Float64 => "number",
        DataType::Utf8 => "string",
        _ => "other",
    }
}

/// Convert a column to JSON values; timestamps of any unit become epoch
/// milliseconds
fn column_to_json(array: &dyn Array) -> Result<Vec<Value>> {
    match array.data_type() {
        DataType::Null => Ok(vec![Value::Null; array.len()]),

        DataType::Utf8 => {
            let arr = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| Error::output("Failed to downcast to StringArray"))?;
            Ok(arr
                .iter()
                .map(|v| v.map_or(Value::Null, |s| Value::String(s.to_string())))
                .collect())
        }

        DataType::Float64 => {
            let arr = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| Error::output("Failed to downcast to Float64Array"))?;
            Ok(arr
                .iter()
                .map(|v| {
                    v.and_then(serde_json::Number::from_f64)
                        .map_or(Value::Null, Value::Number)
                })
                .collect())
        }

        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            let arr = array
                .as_any()
                .downcast_ref::<TimestampMillisecondArray>()
                .ok_or_else(|| Error::output("Failed to downcast to TimestampMillisecondArray"))?;
            Ok(arr
                .iter()
                .map(|v| v.map_or(Value::Null, |ms| Value::Number(ms.into())))
                .collect())
        }

        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let arr = array
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()
                .ok_or_else(|| Error::output("Failed to downcast to TimestampMicrosecondArray"))?;
            Ok(arr
                .iter()
                .map(|v| v.map_or(Value::Null, |us| Value::Number(us.div_euclid(1_000).into())))
                .collect())
        }

        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            let arr = array
                .as_any()
                .downcast_ref::<TimestampNanosecondArray>()
                .ok_or_else(|| Error::output("Failed to downcast to TimestampNanosecondArray"))?;
            Ok(arr
                .iter()
                .map(|v| {
                    v.map_or(Value::Null, |ns| Value::Number(ns.div_euclid(1_000_000).into()))
                })
                .collect())
        }

        other => Err(Error::output(format!(
            "Unsupported column type for JSON output: {other:?}"
        ))),
    }
}

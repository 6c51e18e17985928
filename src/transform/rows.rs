//! Row to frame transformation

use super::coerce::{parse_timestamp, parse_value};
use crate::decode::Row;
use crate::error::Result;
use crate::loader::Query;
use crate::output::{Frame, TimeSeries, TIME_FIELD};
use crate::template;
use crate::types::Precision;
use tracing::debug;

/// Turns series rows into frames
#[derive(Debug, Clone, Copy, Default)]
pub struct RowTransformer {
    precision: Precision,
}

/// Anomalies absorbed while building one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Absorbed {
    /// Tuples skipped entirely
    dropped: usize,
    /// Non-null cells that became gaps
    gaps: usize,
}

impl RowTransformer {
    /// Create a transformer reading timestamps in `precision`
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// Transform every row of one query's result, in order
    pub fn transform_rows(&self, rows: &[Row], query: &Query) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        for row in rows {
            frames.extend(self.transform_row(row, query)?);
        }
        Ok(frames)
    }

    /// Transform one row
    ///
    /// Rows with a `time` column yield one frame per other column; any
    /// other row yields a single frame of strings.
    pub fn transform_row(&self, row: &Row, query: &Query) -> Result<Vec<Frame>> {
        if row.column_index(TIME_FIELD).is_none() {
            return Ok(vec![self.flat_frame(row, query)?]);
        }

        row.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.as_str() != TIME_FIELD)
            .map(|(index, column)| self.time_series_frame(row, index, column, query))
            .collect()
    }

    /// Listing of plain values, e.g. the output of `SHOW TAG VALUES`
    fn flat_frame(&self, row: &Row, query: &Query) -> Result<Frame> {
        // SHOW TAG VALUES returns (key, value) pairs
        let position = usize::from(query.is_show_tag_values());

        let mut absorbed = Absorbed::default();
        let values: Vec<Option<String>> = row
            .values
            .iter()
            .filter_map(|tuple| {
                let cell = tuple.get(position);
                if cell.is_none() {
                    absorbed.dropped += 1;
                }
                cell.map(|c| c.to_text())
            })
            .collect();

        log_absorbed(&row.name, absorbed);
        Frame::string_values(&row.name, values)
    }

    /// One `time` + `value` frame for the column at `column_index`
    fn time_series_frame(
        &self,
        row: &Row,
        column_index: usize,
        column: &str,
        query: &Query,
    ) -> Result<Frame> {
        let mut series =
            TimeSeries::with_capacity(row.values.len()).with_precision(self.precision);
        let mut absorbed = Absorbed::default();

        for tuple in &row.values {
            let Some(Ok(time)) = tuple.first().map(|t| parse_timestamp(t, self.precision)) else {
                absorbed.dropped += 1;
                continue;
            };

            let value = match tuple.get(column_index) {
                Some(cell) => {
                    let value = parse_value(cell);
                    if value.is_none() && !cell.is_null() {
                        absorbed.gaps += 1;
                    }
                    value
                }
                None => {
                    absorbed.gaps += 1;
                    None
                }
            };
            series.push(time, value);
        }

        let name = template::frame_name(row, column, query);
        log_absorbed(&name, absorbed);
        Frame::time_series(series, &row.tags, &name, &query.raw_query)
    }
}

fn log_absorbed(frame: &str, absorbed: Absorbed) {
    if absorbed != Absorbed::default() {
        debug!(
            frame,
            dropped = absorbed.dropped,
            gaps = absorbed.gaps,
            "absorbed malformed cells while building frame"
        );
    }
}

//! Tests for response dispatch module

use super::*;
use crate::config::ParserConfig;
use crate::decode::{NumberLiteral, RawResponse, RawResult, Row, Scalar};
use crate::error::Error;
use crate::loader::Query;
use crate::output::VALUE_FIELD;
use pretty_assertions::assert_eq;

fn queries() -> Vec<Query> {
    vec![
        Query::new("A").with_raw_query("SELECT mean(v) FROM cpu"),
        Query::new("B").with_raw_query("SELECT max(v) FROM mem"),
    ]
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_malformed_body_yields_single_sentinel_error() {
    let response = ResponseParser::new().parse_str(r#"{"results": [{"#, &queries());

    assert_eq!(response.len(), 1);
    let data = response.get("A").unwrap();
    assert!(matches!(data.error(), Some(Error::Decode { .. })));
    assert!(data.frames().is_empty());
    assert!(response.get("B").is_none());
}

#[test]
fn test_engine_error_yields_single_sentinel_error() {
    let body = r#"{
        "error": "database not found: mydb",
        "results": [{"series": [{"name": "cpu", "columns": ["time", "v"], "values": [[1, 1]]}]}]
    }"#;

    let response = ResponseParser::new().parse_str(body, &queries());
    assert_eq!(response.len(), 1);

    let error = response.get("A").unwrap().error().unwrap();
    assert!(matches!(error, Error::Engine { .. }));
    assert_eq!(error.to_string(), "database not found: mydb");
}

#[test]
fn test_sentinel_ref_id_is_configurable() {
    let parser = ResponseParser::with_config(ParserConfig::new().with_sentinel_ref_id("ERR"));

    let response = parser.parse_str("not json", &queries());
    assert_eq!(response.len(), 1);
    assert!(response.get("ERR").unwrap().is_error());
}

// ============================================================================
// Per-Query Dispatch
// ============================================================================

#[test]
fn test_query_error_is_scoped_to_its_ref_id() {
    let body = r#"{
        "results": [
            {"statement_id": 0, "error": "error parsing query: found EOF"},
            {"statement_id": 1, "series": [{"name": "mem", "columns": ["time", "max"], "values": [[1, 2.5]]}]}
        ]
    }"#;

    let response = ResponseParser::new().parse_str(body, &queries());
    assert_eq!(response.len(), 2);

    let a = response.get("A").unwrap();
    assert!(matches!(a.error(), Some(Error::Query { .. })));
    assert_eq!(a.error().unwrap().to_string(), "error parsing query: found EOF");

    let b = response.get("B").unwrap();
    assert!(!b.is_error());
    assert_eq!(b.frames().len(), 1);
    assert_eq!(b.frames()[0].name(), "mem.max");
    assert_eq!(
        b.frames()[0].executed_query_string().as_deref(),
        Some("SELECT max(v) FROM mem")
    );
}

#[test]
fn test_result_without_series_has_no_frames() {
    let body = r#"{"results": [{"statement_id": 0}, {"statement_id": 1, "series": []}]}"#;

    let response = ResponseParser::new().parse_str(body, &queries());
    assert_eq!(response.len(), 2);
    assert!(response.get("A").unwrap().frames().is_empty());
    assert!(!response.get("A").unwrap().is_error());
}

#[test]
fn test_result_count_mismatch_pairs_by_position() {
    let body = r#"{"results": [{"series": [{"name": "cpu", "columns": ["name"], "values": [["x"]]}]}]}"#;

    let response = ResponseParser::new().parse_str(body, &queries());
    assert_eq!(response.len(), 1);
    assert_eq!(response.get("A").unwrap().frames()[0].name(), "cpu");
}

#[test]
fn test_parse_decoded_response() {
    let raw = RawResponse {
        error: None,
        results: vec![RawResult {
            statement_id: Some(0),
            error: None,
            series: vec![Row::new("cpu")
                .with_columns(["time", "v"])
                .with_values(vec![
                    Scalar::Number(NumberLiteral::new("1")),
                    Scalar::Null,
                ])],
        }],
    };

    let response = ResponseParser::new().parse_response(&raw, &queries()[..1]);
    let frames = response.get("A").unwrap().frames();
    assert_eq!(frames[0].floats(VALUE_FIELD).unwrap(), vec![None]);
}

#[test]
fn test_iter_is_ordered_by_ref_id() {
    let body = r#"{"results": [{}, {}]}"#;
    let queries = vec![Query::new("Z"), Query::new("B")];

    let response = ResponseParser::new().parse_str(body, &queries);
    let keys: Vec<&str> = response.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["B", "Z"]);
}

// ============================================================================
// JSON Rendering
// ============================================================================

#[test]
fn test_data_response_to_json() {
    let data = DataResponse::Error(Error::query("boom"));
    assert_eq!(data.to_json().unwrap(), serde_json::json!({"error": "boom"}));

    let data = DataResponse::Frames(vec![]);
    assert_eq!(data.to_json().unwrap(), serde_json::json!({"frames": []}));
}

#[test]
fn test_parser_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseParser>();

    let parser = std::sync::Arc::new(ResponseParser::new());
    let handle = {
        let parser = std::sync::Arc::clone(&parser);
        std::thread::spawn(move || {
            parser
                .parse_str(r#"{"error": "timeout"}"#, &queries())
                .len()
        })
    };
    assert_eq!(handle.join().unwrap(), 1);
}

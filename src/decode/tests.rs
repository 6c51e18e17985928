//! Tests for decoder module

use super::*;
use pretty_assertions::assert_eq;

// ============================================================================
// Scalar Tests
// ============================================================================

#[test]
fn test_scalar_from_json_text() {
    assert_eq!(Scalar::from_json_text("null"), Scalar::Null);
    assert_eq!(Scalar::from_json_text("true"), Scalar::Bool(true));
    assert_eq!(Scalar::from_json_text("false"), Scalar::Bool(false));
    assert_eq!(
        Scalar::from_json_text(r#""us-west""#),
        Scalar::String("us-west".to_string())
    );
    assert_eq!(
        Scalar::from_json_text("-12.5e3"),
        Scalar::Number(NumberLiteral::new("-12.5e3"))
    );
    assert_eq!(
        Scalar::from_json_text("[1,2]"),
        Scalar::Other("[1,2]".to_string())
    );
}

#[test]
fn test_scalar_escaped_string() {
    let scalar = Scalar::from_json_text(r#""a \"quoted\" é""#);
    assert_eq!(scalar.as_str(), Some("a \"quoted\" é"));
}

#[test]
fn test_scalar_to_text() {
    assert_eq!(Scalar::Null.to_text(), None);
    assert_eq!(Scalar::from("abc").to_text(), Some("abc".to_string()));
    assert_eq!(Scalar::from(42_i64).to_text(), Some("42".to_string()));
    assert_eq!(Scalar::from(true).to_text(), Some("true".to_string()));
}

#[test]
fn test_scalar_from_option() {
    assert_eq!(Scalar::from(None::<f64>), Scalar::Null);
    assert_eq!(Scalar::from(Some("x")), Scalar::String("x".to_string()));
}

// ============================================================================
// NumberLiteral Tests
// ============================================================================

#[test]
fn test_number_literal_keeps_text() {
    let n = NumberLiteral::new("1527305040000000000");
    assert_eq!(n.as_str(), "1527305040000000000");
    assert_eq!(n.to_string(), "1527305040000000000");
}

#[test]
fn test_number_literal_to_f64() {
    assert_eq!(NumberLiteral::new("1.5").to_f64().unwrap(), 1.5);
    assert_eq!(NumberLiteral::new("-3").to_f64().unwrap(), -3.0);
    assert_eq!(NumberLiteral::new("2.5E2").to_f64().unwrap(), 250.0);
}

#[test]
fn test_number_literal_exact_conversion() {
    // 0.1 must round to the same double as a direct parse, not via f32
    let n = NumberLiteral::new("0.1");
    assert_eq!(n.to_f64().unwrap().to_bits(), 0.1_f64.to_bits());

    // 2^53 + 1 rounds to 2^53 exactly once
    let n = NumberLiteral::new("9007199254740993");
    assert_eq!(n.to_f64().unwrap(), 9_007_199_254_740_992.0);
}

#[test]
fn test_number_literal_conversion_failure() {
    assert!(NumberLiteral::new("1e400").to_f64().is_err());
    assert!(NumberLiteral::new("NaN").to_f64().is_err());
    assert!(NumberLiteral::new("12abc").to_f64().is_err());
}

// ============================================================================
// JSON Response Decoder Tests
// ============================================================================

#[test]
fn test_decode_full_response() {
    let body = r#"
    {
        "results": [
            {
                "statement_id": 0,
                "series": [
                    {
                        "name": "cpu",
                        "tags": {"host": "server1"},
                        "columns": ["time", "mean"],
                        "values": [[1527305040, 1.5], [1527305050, null]]
                    }
                ]
            }
        ]
    }
    "#;

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    assert!(response.error_message().is_none());
    assert_eq!(response.results.len(), 1);

    let result = &response.results[0];
    assert_eq!(result.statement_id, Some(0));
    assert!(result.error_message().is_none());

    let row = &result.series[0];
    assert_eq!(row.name, "cpu");
    assert_eq!(row.columns, vec!["time", "mean"]);
    assert_eq!(row.tags.get("host").map(String::as_str), Some("server1"));
    assert_eq!(row.values.len(), 2);
    assert_eq!(row.values[0][0], Scalar::Number(NumberLiteral::new("1527305040")));
    assert_eq!(row.values[0][1], Scalar::Number(NumberLiteral::new("1.5")));
    assert_eq!(row.values[1][1], Scalar::Null);
}

#[test]
fn test_decode_preserves_large_integers() {
    let body = r#"{"results":[{"series":[{"name":"m","columns":["time","v"],"values":[[1,123456789012345678901234567890]]}]}]}"#;

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    let value = &response.results[0].series[0].values[0][1];
    assert_eq!(
        value.as_number().map(NumberLiteral::as_str),
        Some("123456789012345678901234567890")
    );
}

#[test]
fn test_decode_top_level_error() {
    let body = r#"{"error": "database not found: mydb"}"#;

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    assert_eq!(response.error_message(), Some("database not found: mydb"));
    assert!(response.results.is_empty());
}

#[test]
fn test_decode_empty_error_is_ignored() {
    let body = r#"{"error": "", "results": [{"error": ""}]}"#;

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    assert!(response.error_message().is_none());
    assert!(response.results[0].error_message().is_none());
}

#[test]
fn test_decode_nulls_as_missing() {
    let body = r#"{"results": [{"series": [{"name": "m", "tags": null, "columns": null, "values": null}]}]}"#;

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    let row = &response.results[0].series[0];
    assert!(row.tags.is_empty());
    assert!(row.columns.is_empty());
    assert!(row.values.is_empty());
}

#[test]
fn test_decode_ignores_trailing_content() {
    let body = "{\"results\": []}\n{\"results\": [{}]}";

    let response = JsonResponseDecoder::new().decode_str(body).unwrap();
    assert!(response.results.is_empty());
}

#[test]
fn test_decode_from_reader() {
    let body = br#"{"results": [{"series": []}]}"#;
    let mut reader: &[u8] = body;

    let response = decode_response(&mut reader).unwrap();
    assert_eq!(response.results.len(), 1);
}

#[test]
fn test_decode_malformed() {
    let result = JsonResponseDecoder::new().decode_str(r#"{"results": [ "#);
    assert!(matches!(result, Err(crate::Error::Decode { .. })));

    let result = JsonResponseDecoder::new().decode_str("<html>502 Bad Gateway</html>");
    assert!(matches!(result, Err(crate::Error::Decode { .. })));
}

#[test]
fn test_decode_empty_body() {
    let result = JsonResponseDecoder::new().decode_str("   ");
    assert!(result.unwrap_err().to_string().contains("empty response body"));
}

// ============================================================================
// Row Tests
// ============================================================================

#[test]
fn test_row_builder() {
    let row = Row::new("cpu")
        .with_columns(["time", "value"])
        .with_tag("host", "a")
        .with_values(vec![Scalar::from(1_i64), Scalar::from(2.5)]);

    assert_eq!(row.name, "cpu");
    assert_eq!(row.column_index("value"), Some(1));
    assert_eq!(row.column_index("missing"), None);
    assert_eq!(row.values.len(), 1);
}

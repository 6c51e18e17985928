//! Tests for query loader module

use super::*;
use std::io::Write;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_query_list() {
    let yaml = r#"
- refId: A
  alias: "$m.$col"
  measurement: cpu
  query: SELECT mean("value") FROM "cpu" GROUP BY time(1m)
- refId: B
  rawQuery: SHOW TAG VALUES WITH KEY = "host"
"#;

    let queries = load_queries_from_str(yaml).unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].ref_id, "A");
    assert_eq!(queries[0].alias, "$m.$col");
    assert_eq!(queries[0].measurement, "cpu");
    assert!(queries[0].raw_query.starts_with("SELECT"));
    assert_eq!(queries[1].ref_id, "B");
    assert!(queries[1].alias.is_empty());
    assert!(queries[1].is_show_tag_values());
}

#[test]
fn test_load_wrapped_queries() {
    let yaml = r#"
queries:
  - refId: A
    measurement: mem
"#;

    let queries = load_queries_from_str(yaml).unwrap();
    assert_eq!(queries, vec![Query::new("A").with_measurement("mem")]);
}

#[test]
fn test_load_json_queries() {
    let json = r#"[{"refId": "A", "raw_query": "select 1"}, {"ref_id": "B"}]"#;

    let queries = load_queries_from_str(json).unwrap();
    assert_eq!(queries[0].raw_query, "select 1");
    assert_eq!(queries[1].ref_id, "B");
}

#[test]
fn test_load_queries_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "- refId: A").unwrap();

    let queries = load_queries(file.path()).unwrap();
    assert_eq!(queries.len(), 1);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_empty_query_list() {
    let result = load_queries_from_str("[]");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("At least one query"));
}

#[test]
fn test_empty_ref_id() {
    let result = load_queries_from_str(r#"[{"refId": ""}]"#);
    assert!(result.unwrap_err().to_string().contains("empty refId"));
}

#[test]
fn test_duplicate_ref_id() {
    let result = load_queries_from_str(r#"[{"refId": "A"}, {"refId": "A"}]"#);
    assert!(result.unwrap_err().to_string().contains("Duplicate refId 'A'"));
}

#[test]
fn test_missing_file() {
    let result = load_queries("/nonexistent/queries.yaml");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to read queries file"));
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_show_tag_values_is_case_insensitive() {
    assert!(Query::new("A")
        .with_raw_query("show tag values from cpu with key = host")
        .is_show_tag_values());
    assert!(Query::new("A")
        .with_raw_query("SHOW TAG VALUES")
        .is_show_tag_values());
    assert!(!Query::new("A")
        .with_raw_query("SHOW TAG KEYS")
        .is_show_tag_values());
}

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

use crate::violation::Violation;

fn render(violations: &[Violation], passed: bool) -> serde_json::Value {
    let mut out = Vec::new();
    write_report(&mut out, violations, passed).unwrap();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn report_carries_timestamp_passed_and_violations() {
    let v = Violation::at(
        "hardcoded-bucket",
        "a.py",
        3,
        9,
        "tatari-datalake",
        "hardcoded bucket `tatari-datalake` detected",
    );
    let doc = render(std::slice::from_ref(&v), false);

    assert_eq!(doc["passed"], serde_json::json!(false));
    assert!(doc["timestamp"].is_string());

    let violations = doc["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["rule"], "hardcoded-bucket");
    assert_eq!(violations[0]["line"], 3);
    assert_eq!(violations[0]["column"], 9);
}

#[test]
fn optional_fields_are_omitted_when_absent() {
    let v = Violation::file_level("dockerfile-poetry", "Dockerfile", "poetry", "not pinned");
    let doc = render(std::slice::from_ref(&v), false);

    let violation = &doc["violations"][0];
    assert!(violation.get("line").is_none());
    assert!(violation.get("column").is_none());
    assert!(violation.get("replacement").is_none());
    assert!(violation.get("suggestion").is_none());
}

#[test]
fn clean_runs_report_passed_with_no_violations() {
    let doc = render(&[], true);
    assert_eq!(doc["passed"], serde_json::json!(true));
    assert_eq!(doc["violations"].as_array().unwrap().len(), 0);
}

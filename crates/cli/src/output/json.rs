//! JSON report document.

use std::io::Write;

use serde::Serialize;

use crate::violation::Violation;

/// Aggregated run report emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    /// Whether the run finished without violations.
    pub passed: bool,

    /// Every violation found, in report order.
    pub violations: &'a [Violation],
}

/// Serialize the report to `out` as pretty-printed JSON.
pub fn write_report(
    mut out: impl Write,
    violations: &[Violation],
    passed: bool,
) -> std::io::Result<()> {
    let report = RunReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        passed,
        violations,
    };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

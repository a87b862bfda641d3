//! Violation records produced by the hooks.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A single policy infraction found in a scanned file.
///
/// Created during a scan, filtered by the suppression pass, then printed.
/// Nothing is persisted across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule identifier (e.g., "hardcoded-bucket", "disallowed-attribute").
    pub rule: &'static str,

    /// The flagged name or matched text.
    pub name: String,

    /// Suggested replacement, when the rule carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,

    /// File the violation was found in.
    pub file: PathBuf,

    /// Line number, 1-based (None for whole-file violations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Column offset, 0-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Human-readable description, without the file/line prefix.
    pub message: String,

    /// Multi-line fix guidance (printed indented under the violation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    /// Create a violation anchored to a line and column.
    pub fn at(
        rule: &'static str,
        file: impl Into<PathBuf>,
        line: u32,
        column: u32,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            name: name.into(),
            replacement: None,
            file: file.into(),
            line: Some(line),
            column: Some(column),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a whole-file violation with no position.
    pub fn file_level(
        rule: &'static str,
        file: impl Into<PathBuf>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            name: name.into(),
            replacement: None,
            file: file.into(),
            line: None,
            column: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a suggested replacement.
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    /// Attach multi-line fix guidance.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Location key used for deduplication: (file, line, column, rule).
    pub fn location_key(&self) -> (&Path, Option<u32>, Option<u32>, &'static str) {
        (self.file.as_path(), self.line, self.column, self.rule)
    }
}

/// Drop violations that repeat an already-seen (file, line, column, rule)
/// location, preserving first-seen order.
pub fn dedupe(violations: Vec<Violation>) -> Vec<Violation> {
    let mut seen = std::collections::HashSet::new();
    violations
        .into_iter()
        .filter(|v| {
            let key = (
                v.file.clone(),
                v.line,
                v.column,
                v.rule,
            );
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
#[path = "violation_tests.rs"]
mod tests;

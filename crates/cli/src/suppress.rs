// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Inline suppression annotations.
//!
//! A violation is dropped when its source line carries the suppression
//! marker anywhere in the line text. The scope is exactly one physical
//! line; there is no block or file-level form.

use std::fs;
use std::path::Path;

use memchr::memmem::Finder;

use crate::error::{Error, Result};
use crate::violation::Violation;

/// Default marker recognized by the tree-scanning hooks.
pub const DEFAULT_MARKER: &str = "tatari-noqa";

/// Drop every violation whose source line contains `marker`.
///
/// Re-reads the file (the scan already read it once; the two reads happen
/// synchronously in one invocation, so the line numbers still refer to the
/// same snapshot). Violations need not be sorted, and several violations on
/// one line are suppressed together by a single marker occurrence.
/// Violations without a line number cannot be suppressed and are kept.
///
/// An unreadable file is an error, not a silent pass.
pub fn drop_suppressed(
    path: &Path,
    violations: Vec<Violation>,
    marker: &str,
) -> Result<Vec<Violation>> {
    if violations.is_empty() {
        return Ok(violations);
    }

    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let finder = Finder::new(marker.as_bytes());

    let mut suppressed_lines = std::collections::HashSet::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = (idx + 1) as u32;
        if finder.find(line.as_bytes()).is_some() {
            suppressed_lines.insert(line_no);
        }
    }

    Ok(violations
        .into_iter()
        .filter(|v| match v.line {
            Some(line) => !suppressed_lines.contains(&line),
            None => true,
        })
        .collect())
}

#[cfg(test)]
#[path = "suppress_tests.rs"]
mod tests;

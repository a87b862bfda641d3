// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Generated-column guard for Postgres migrations (`generated-columns`).
//!
//! Postgres WAL replication to the datalake does not support generated
//! columns. Migrations are named `<YYYYMMDD>...`; only migrations dated on
//! or after the replication cutover are checked, so historical files stay
//! untouched.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::cli::FilesArgs;
use crate::error::{Error, ExitCode, Result};
use crate::output::Reporter;
use crate::pattern::byte_offset_to_line;
use crate::violation::Violation;

/// Migrations dated before this are grandfathered.
pub const CUTOFF_DATE: &str = "20240426";

const GENERATED_COLUMN_PATTERN: &str = r"GENERATED ALWAYS AS \(\w+\) STORED";
const FILE_DATE_PATTERN: &str = r"^\d{8}";

const ADVICE: &str = "Postgres WAL replication to the datalake does not \
    support generated columns; use a different approach";

/// `generated-columns` entry point.
pub fn run(args: &FilesArgs, reporter: &mut Reporter) -> Result<ExitCode> {
    let sql_re = compile(GENERATED_COLUMN_PATTERN)?;
    let date_re = compile(FILE_DATE_PATTERN)?;

    let mut code = ExitCode::Clean;
    for file in filter_migrations(&args.files, &date_re) {
        let violations = check_file(file, &sql_re)?;
        reporter.report(&violations)?;
        code = code.and(ExitCode::from_violations(violations.len()));
    }
    Ok(code)
}

/// Keep migrations whose basename carries a date at or after the cutoff.
/// Files without a leading date are not migrations and are excluded.
fn filter_migrations<'a>(files: &'a [PathBuf], date_re: &Regex) -> Vec<&'a Path> {
    files
        .iter()
        .filter(|f| {
            f.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| date_re.find(n))
                .is_some_and(|m| m.as_str() >= CUTOFF_DATE)
        })
        .map(|f| f.as_path())
        .collect()
}

fn check_file(path: &Path, sql_re: &Regex) -> Result<Vec<Violation>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    Ok(sql_re
        .find_iter(&content)
        .map(|m| {
            Violation::at(
                "generated-column",
                path,
                byte_offset_to_line(&content, m.start()),
                0,
                m.as_str(),
                ADVICE,
            )
        })
        .collect())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Config {
        message: format!("invalid pattern: {e}"),
        path: None,
    })
}

#[cfg(test)]
#[path = "migrations_tests.rs"]
mod tests;

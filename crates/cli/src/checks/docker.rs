// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Dockerfile poetry pin check (`dockerfile-poetry`).
//!
//! Every Dockerfile that installs poetry must pin its version; an
//! unpinned install drifts with upstream releases and breaks image
//! reproducibility.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::cli::FilesArgs;
use crate::error::{Error, ExitCode, Result};
use crate::output::Reporter;
use crate::violation::Violation;

const POETRY_PIN_PATTERN: &str = r"poetry[~]?=[\d.]+";

/// `dockerfile-poetry` entry point.
pub fn run(args: &FilesArgs, reporter: &mut Reporter) -> Result<ExitCode> {
    let pin_re = Regex::new(POETRY_PIN_PATTERN).map_err(|e| Error::Config {
        message: format!("invalid pattern: {e}"),
        path: None,
    })?;

    let mut code = ExitCode::Clean;
    for file in &args.files {
        let violations = check_file(file, &pin_re)?;
        reporter.report(&violations)?;
        code = code.and(ExitCode::from_violations(violations.len()));
    }
    Ok(code)
}

fn check_file(path: &Path, pin_re: &Regex) -> Result<Vec<Violation>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    if pin_re.is_match(&content) {
        return Ok(Vec::new());
    }
    Ok(vec![Violation::file_level(
        "dockerfile-poetry",
        path,
        "poetry",
        "poetry version must be pinned (e.g. `poetry==1.8.3`)",
    )])
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;

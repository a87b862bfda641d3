// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Non-Spark bucket imports in Spark projects (`no-non-spark-buckets`).
//!
//! After the single-region consolidation, dev/staging moved from
//! us-west-2 to us-east-1. The non-Spark bucket helpers still default to
//! us-west-2; the Spark variants resolve correctly. Projects that depend
//! on PySpark or the ML utilities must import the Spark variants.
//!
//! Bulk hook: files outside a Poetry project, files in projects without a
//! Spark dependency, and unreadable files all contribute zero violations.

use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::cli::FilesArgs;
use crate::config::Config;
use crate::error::{Error, ExitCode, Result};
use crate::files::PySelector;
use crate::manifest;
use crate::output::Reporter;
use crate::violation::Violation;

/// Imports that resolve buckets without Spark awareness.
const NON_SPARK_IMPORT_PATTERNS: &[&str] = &[
    r"from\s+tatari_data_utils\.buckets\s+import\s+",
    r"from\s+tatari_data_utils\s+import\s+.*get_default_buckets_for_env",
];

const SPARK_IMPORT_PATTERN: &str = "buckets_spark";

const ADVICE: &str = "non-Spark bucket import in a PySpark/ML project; \
    use `tatari_data_utils.buckets_spark` (or the tatari-pyspark / \
    tatari-ml-utils wrappers) instead";

struct SparkRules {
    non_spark: Vec<Regex>,
    noqa: Regex,
}

impl SparkRules {
    fn compile() -> Result<Self> {
        let non_spark = NON_SPARK_IMPORT_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Config {
                message: format!("invalid import pattern: {e}"),
                path: None,
            })?;
        let noqa = RegexBuilder::new(r"#\s*noqa:\s*non-spark-buckets")
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Config {
                message: format!("invalid noqa pattern: {e}"),
                path: None,
            })?;
        Ok(Self { non_spark, noqa })
    }
}

/// `no-non-spark-buckets` entry point.
pub fn run(args: &FilesArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    let rules = SparkRules::compile()?;
    let selector = PySelector::new();

    let mut total = 0usize;
    for file in &args.files {
        if !selector.is_python(file) {
            continue;
        }
        let violations = check_file(file, &rules, &config.spark.dependencies);
        reporter.report(&violations)?;
        total += violations.len();
    }
    Ok(ExitCode::from_violations(total))
}

fn check_file(path: &Path, rules: &SparkRules, spark_deps: &[String]) -> Vec<Violation> {
    let Some(pyproject) = manifest::find_pyproject(path) else {
        return Vec::new();
    };
    if !is_spark_project(&pyproject, spark_deps) {
        return Vec::new();
    }

    let Ok(content) = fs::read_to_string(path) else {
        tracing::warn!(path = %path.display(), "skipping unreadable file");
        return Vec::new();
    };

    let mut violations = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if rules.noqa.is_match(line) {
            continue;
        }
        if line.contains(SPARK_IMPORT_PATTERN) {
            continue;
        }
        for pattern in &rules.non_spark {
            if let Some(m) = pattern.find(line) {
                violations.push(Violation::at(
                    "non-spark-buckets",
                    path,
                    idx as u32 + 1,
                    m.start() as u32,
                    line.trim(),
                    ADVICE,
                ));
                break;
            }
        }
    }
    violations
}

/// A project is Spark-flavored when its Poetry dependency table names any
/// of the configured Spark dependencies. Unreadable manifests and other
/// schemas are treated as "not a Spark project".
fn is_spark_project(pyproject: &Path, spark_deps: &[String]) -> bool {
    match manifest::try_poetry_dependency_names(pyproject) {
        Some(names) => names.iter().any(|n| spark_deps.iter().any(|d| d == n)),
        None => false,
    }
}

#[cfg(test)]
#[path = "spark_tests.rs"]
mod tests;

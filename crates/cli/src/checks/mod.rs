//! Hook registry.
//!
//! One module per pre-commit hook. Every hook follows the same shape:
//! parse or scan each input file, match against its rule set, collect
//! violations, drop suppressed lines, report, and fold the per-file
//! statuses into one exit code.

pub mod branch;
pub mod buckets;
pub mod constraints;
pub mod docker;
pub mod identifiers;
pub mod imports;
pub mod migrations;
pub mod operators;
pub mod spark;

/// All hook subcommand names in canonical order.
pub const HOOK_NAMES: &[&str] = &[
    "disallowed-attributes",
    "disallowed-function-calls",
    "disallowed-identifiers",
    "forbidden-imports",
    "no-boto3-in-airflow-dags",
    "no-hardcoded-buckets",
    "no-non-spark-buckets",
    "image-tag-branch",
    "generated-columns",
    "dockerfile-poetry",
    "app-constraints",
    "pkg-constraints",
    "poetry-app-constraints",
    "poetry-pkg-constraints",
    "poetry-pkg-dep-constraints",
    "validate-branch-name",
];

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

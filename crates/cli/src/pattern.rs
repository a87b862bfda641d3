//! Compiled pattern tables for the line-oriented scanners.
//!
//! Pattern tables are built once per invocation and injected into the
//! scanners; nothing here is process-global mutable state.

use aho_corasick::AhoCorasick;
use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Bucket naming conventions flagged by the buckets hook.
///
/// Note: prod scratch uses 'tatari-scratch-useast1' without hyphens.
pub const BUCKET_PATTERNS: &[&str] = &[
    r"tatari-datalake(?:-(?:dev|staging|prod|test))?(?:-us-(?:east|west)-\d)?",
    r"tatari-scratch(?:-(?:dev|staging|prod|test))?(?:-us-(?:east|west)-\d)?",
    r"tatari-scratch-useast\d",
    r"tatari-datalake-temp-(?:dev|staging|prod)-us-(?:east|west)-\d",
    r"tatari-gx-(?:dev|staging|prod)(?:-us-(?:east|west)-\d)?",
    r"tatari-xcom-(?:dev|staging|prod)(?:-us-(?:east|west)-\d)?",
    r"tatari-analysis-validation-temp-(?:dev|staging|prod)-us-(?:east|west)-\d",
    r"tatari-data-science",
];

/// Hardcoded region strings flagged when region checking is enabled.
pub const REGION_PATTERNS: &[&str] = &[
    r"\bus-east-1\b",
    r"\bus-west-2\b",
    r"\buseast1\b",
    r"\buswest2\b",
];

/// Environment-predicate names whose call in a condition marks a branch as
/// environment-conditional.
pub const ENV_CHECK_FUNCTIONS: &[&str] = &["is_production", "is_staging", "is_prodlike", "is_dev"];

/// Literal fragments that must appear before any bucket/region regex can
/// match; used as an Aho-Corasick prefilter so clean files skip the regex
/// pass entirely.
const PREFILTER_LITERALS: &[&str] = &["tatari-", "us-east", "us-west", "useast", "uswest"];

/// Join patterns into a single grouped alternation.
pub fn join_alternation(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|p| format!("({p})"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled bucket-detection rules.
pub struct BucketRules {
    bucket: Regex,
    region: Regex,
    noqa: Regex,
    prefilter: AhoCorasick,
    env_checks: Vec<String>,
}

impl BucketRules {
    /// Compile the built-in tables plus any configured extras.
    pub fn compile(
        extra_buckets: &[String],
        extra_regions: &[String],
        extra_env_checks: &[String],
    ) -> Result<Self> {
        let mut buckets: Vec<String> = BUCKET_PATTERNS.iter().map(|s| s.to_string()).collect();
        buckets.extend(extra_buckets.iter().cloned());
        let mut regions: Vec<String> = REGION_PATTERNS.iter().map(|s| s.to_string()).collect();
        regions.extend(extra_regions.iter().cloned());

        let mut env_checks: Vec<String> =
            ENV_CHECK_FUNCTIONS.iter().map(|s| s.to_string()).collect();
        env_checks.extend(extra_env_checks.iter().cloned());

        Ok(Self {
            bucket: compile_alternation(&buckets)?,
            region: compile_alternation(&regions)?,
            noqa: RegexBuilder::new(r"#\s*noqa:\s*hardcoded-bucket")
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::Config {
                    message: format!("invalid noqa pattern: {e}"),
                    path: None,
                })?,
            prefilter: AhoCorasick::new(PREFILTER_LITERALS).map_err(|e| Error::Config {
                message: format!("prefilter build failed: {e}"),
                path: None,
            })?,
            env_checks,
        })
    }

    /// Bucket-name alternation.
    pub fn bucket(&self) -> &Regex {
        &self.bucket
    }

    /// Region-string alternation.
    pub fn region(&self) -> &Regex {
        &self.region
    }

    /// Line-level `# noqa: hardcoded-bucket` exemption.
    pub fn has_noqa(&self, line: &str) -> bool {
        self.noqa.is_match(line)
    }

    /// Fast literal prescan: false means no bucket or region pattern can
    /// match anywhere in `content`.
    pub fn may_match(&self, content: &str) -> bool {
        self.prefilter.is_match(content)
    }

    /// True if `name` is a recognized environment predicate.
    pub fn is_env_check(&self, name: &str) -> bool {
        self.env_checks.iter().any(|f| f == name)
    }
}

fn compile_alternation(patterns: &[String]) -> Result<Regex> {
    Regex::new(&join_alternation(patterns)).map_err(|e| Error::Config {
        message: format!("invalid pattern table: {e}"),
        path: None,
    })
}

/// How a physical line participates in pattern scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Comment-only or docstring line; skipped.
    Skip,
    /// Ordinary code; scanned.
    Code,
}

/// Line-oriented comment/docstring classifier.
///
/// A line with an odd count of a triple-quote delimiter toggles the
/// inside-docstring flag; an even count (>= 2) is a self-contained
/// docstring line and does not toggle. This is a line-based heuristic, not
/// a string-literal parse; it can misfire on unbalanced triple quotes
/// embedded in other constructs. Known limitation, kept as-is.
#[derive(Debug, Default)]
pub struct DocstringTracker {
    inside: bool,
}

impl DocstringTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line and advance the docstring state.
    pub fn classify(&mut self, line: &str) -> LineClass {
        let stripped = line.trim();

        if stripped.contains("\"\"\"") || stripped.contains("'''") {
            let triple_double = stripped.matches("\"\"\"").count();
            let triple_single = stripped.matches("'''").count();

            if triple_double >= 2 || triple_single >= 2 {
                return LineClass::Skip;
            } else if triple_double == 1 || triple_single == 1 {
                self.inside = !self.inside;
                return LineClass::Skip;
            }
        }

        if self.inside {
            return LineClass::Skip;
        }

        if stripped.starts_with('#') {
            return LineClass::Skip;
        }

        LineClass::Code
    }
}

/// Convert a byte offset into a 1-based line number.
pub fn byte_offset_to_line(content: &str, offset: usize) -> u32 {
    content[..offset].bytes().filter(|&b| b == b'\n').count() as u32 + 1
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;

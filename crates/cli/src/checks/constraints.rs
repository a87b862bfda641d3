// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Dependency version-constraint validators.
//!
//! Five hooks over two manifest schemas, all driven by one profile policy
//! table:
//!
//! | profile                 | python rule            | package rule              |
//! |-------------------------|------------------------|---------------------------|
//! | application             | contains `~=`          | contains `~=`             |
//! | application (legacy `^`)| starts with `~`        | starts with `^`           |
//! | package                 | contains `>=` or `~=`  | contains `>=`, never `<=` |
//!
//! Every declared dependency is evaluated and reported before the
//! aggregate status returns; `--ignore` exempts named dependencies from
//! the package rule only. A missing or malformed manifest is fatal.

use std::path::Path;

use crate::cli::ConstraintArgs;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::manifest::{Dependency, Manifest, Pep621Manifest, PoetryManifest};
use crate::output::Reporter;
use crate::violation::Violation;

const RULE: &str = "dependency-constraint";

/// Constraint policy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Applications on PEP 621 manifests: compatible-release everywhere.
    Application,
    /// Applications on legacy Poetry manifests: tilde python, caret packages.
    LegacyApplication,
    /// Packages: minimum bounds only, no upper pins.
    Package,
}

impl Profile {
    pub fn python_ok(self, constraint: &str) -> bool {
        match self {
            Profile::Application => constraint.contains("~="),
            Profile::LegacyApplication => constraint.starts_with('~'),
            Profile::Package => constraint.contains(">=") || constraint.contains("~="),
        }
    }

    pub fn package_ok(self, constraint: &str) -> bool {
        match self {
            Profile::Application => constraint.contains("~="),
            Profile::LegacyApplication => constraint.starts_with('^'),
            Profile::Package => constraint.contains(">=") && !constraint.contains("<="),
        }
    }

    fn python_advice(self) -> &'static str {
        match self {
            Profile::Application => {
                "applications should use ~= when defining requires-python, \
                 e.g. requires-python = \"~=3.10\""
            }
            Profile::LegacyApplication => {
                "applications should use ~ when defining python versions, \
                 e.g. python = \"~3.10\""
            }
            Profile::Package => {
                "packages should use >= or ~= when defining requires-python, \
                 e.g. requires-python = \">=3.10\""
            }
        }
    }

    fn package_advice(self) -> &'static str {
        match self {
            Profile::Application => {
                "application package constraints should use ~= (compatible \
                 release), e.g. tatari-metrics = \"~=1.0.1\""
            }
            Profile::LegacyApplication => {
                "application package constraints should use ^, \
                 e.g. tatari-metrics = \"^1.0.1\""
            }
            Profile::Package => {
                "package constraints should use >= with no <= upper bound, \
                 e.g. tatari-pyspark = \">=1.0.14\""
            }
        }
    }
}

/// Legacy Poetry rule for the `python` entry of package repos: caret, or
/// less ideally a minimum bound.
fn legacy_package_python_ok(constraint: &str) -> bool {
    constraint.starts_with('^') || constraint.starts_with(">=")
}

const LEGACY_PACKAGE_PYTHON_ADVICE: &str = "packages should use ^ (or less ideally >=) \
    when defining python versions, e.g. python = \"^3.10\"";

/// `app-constraints` entry point (PEP 621, application profile).
pub fn run_app(args: &ConstraintArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    run_pep621(args, config, reporter, Profile::Application)
}

/// `pkg-constraints` entry point (PEP 621, package profile).
pub fn run_pkg(args: &ConstraintArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    run_pep621(args, config, reporter, Profile::Package)
}

fn run_pep621(
    args: &ConstraintArgs,
    config: &Config,
    reporter: &mut Reporter,
    profile: Profile,
) -> Result<ExitCode> {
    let ignore = merged_ignore(args, config);
    match Manifest::load(&args.manifest)? {
        Manifest::Pep621(m) => validate_pep621(&m, profile, &ignore, reporter),
        Manifest::Poetry(_) => {
            wrong_schema(&args.manifest, "PEP 621 (project.dependencies)", reporter)
        }
    }
}

fn validate_pep621(
    manifest: &Pep621Manifest,
    profile: Profile,
    ignore: &[String],
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let mut violations = Vec::new();

    if let Some(ref requires_python) = manifest.requires_python
        && !profile.python_ok(requires_python)
    {
        violations.push(constraint_violation(
            &manifest.path,
            "requires-python",
            requires_python,
            profile.python_advice(),
        ));
    }

    for dep in manifest.dependencies() {
        if ignore.iter().any(|i| i == &dep.name) {
            continue;
        }
        if !profile.package_ok(&dep.constraint) {
            violations.push(constraint_violation(
                &manifest.path,
                &dep.name,
                &dep.constraint,
                profile.package_advice(),
            ));
        }
    }

    reporter.report(&violations)?;
    Ok(ExitCode::from_violations(violations.len()))
}

/// `poetry-app-constraints` entry point (Poetry, legacy application
/// profile: `python` against the tilde rule, packages against caret).
pub fn run_poetry_app(
    args: &ConstraintArgs,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let ignore = merged_ignore(args, config);
    match Manifest::load(&args.manifest)? {
        Manifest::Poetry(m) => validate_poetry(
            &m,
            Profile::LegacyApplication,
            PythonRule::Profile,
            &ignore,
            false,
            reporter,
        ),
        Manifest::Pep621(_) => {
            wrong_schema(&args.manifest, "Poetry (tool.poetry.dependencies)", reporter)
        }
    }
}

/// `poetry-pkg-constraints` entry point (Poetry, package profile).
pub fn run_poetry_pkg(
    args: &ConstraintArgs,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let ignore = merged_ignore(args, config);
    match Manifest::load(&args.manifest)? {
        Manifest::Poetry(m) => validate_poetry(
            &m,
            Profile::Package,
            PythonRule::LegacyCaret,
            &ignore,
            false,
            reporter,
        ),
        Manifest::Pep621(_) => {
            wrong_schema(&args.manifest, "Poetry (tool.poetry.dependencies)", reporter)
        }
    }
}

/// `poetry-pkg-dep-constraints` entry point: the narrow historical hook
/// that validates only the `python` entry.
pub fn run_poetry_pkg_dep(
    args: &ConstraintArgs,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let ignore = merged_ignore(args, config);
    match Manifest::load(&args.manifest)? {
        Manifest::Poetry(m) => validate_poetry(
            &m,
            Profile::Package,
            PythonRule::LegacyCaret,
            &ignore,
            true,
            reporter,
        ),
        Manifest::Pep621(_) => {
            wrong_schema(&args.manifest, "Poetry (tool.poetry.dependencies)", reporter)
        }
    }
}

/// Which rule governs the `python` entry of a Poetry manifest.
enum PythonRule {
    /// The profile's own python rule.
    Profile,
    /// The caret-era package rule (`^` or `>=`).
    LegacyCaret,
}

fn validate_poetry(
    manifest: &PoetryManifest,
    profile: Profile,
    python_rule: PythonRule,
    ignore: &[String],
    python_only: bool,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let mut violations = Vec::new();

    for Dependency { name, constraint } in &manifest.dependencies {
        if name == "python" {
            let (ok, advice) = match python_rule {
                PythonRule::Profile => (profile.python_ok(constraint), profile.python_advice()),
                PythonRule::LegacyCaret => (
                    legacy_package_python_ok(constraint),
                    LEGACY_PACKAGE_PYTHON_ADVICE,
                ),
            };
            if !ok {
                violations.push(constraint_violation(&manifest.path, name, constraint, advice));
            }
            continue;
        }

        if python_only || ignore.iter().any(|i| i == name) {
            continue;
        }
        if !profile.package_ok(constraint) {
            violations.push(constraint_violation(
                &manifest.path,
                name,
                constraint,
                profile.package_advice(),
            ));
        }
    }

    reporter.report(&violations)?;
    Ok(ExitCode::from_violations(violations.len()))
}

fn constraint_violation(
    manifest: &Path,
    name: &str,
    constraint: &str,
    advice: &'static str,
) -> Violation {
    Violation::file_level(
        RULE,
        manifest,
        name,
        format!("incorrect format: {name} = \"{constraint}\""),
    )
    .with_suggestion(advice)
}

fn wrong_schema(
    manifest: &Path,
    expected: &str,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    let violation = Violation::file_level(
        "manifest-schema",
        manifest,
        "pyproject.toml",
        format!("this hook only validates {expected} manifests"),
    );
    reporter.report(std::slice::from_ref(&violation))?;
    Ok(ExitCode::Fail)
}

fn merged_ignore(args: &ConstraintArgs, config: &Config) -> Vec<String> {
    let mut ignore = config.constraints.ignore.clone();
    ignore.extend(args.ignore.iter().cloned());
    ignore
}

#[cfg(test)]
#[path = "constraints_tests.rs"]
mod tests;

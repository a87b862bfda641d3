//! Specs for the constraint validators.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn application_profile_rejects_minimum_requires_python() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\nrequires-python = \">=3.10\"\ndependencies = []\n",
    );

    turnstile_cmd()
        .args(["app-constraints", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("requires-python"));
}

#[test]
fn application_profile_accepts_compatible_release() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\nrequires-python = \"~=3.10\"\ndependencies = [\n    \"tatari-foo[dev]~=1.0\",\n]\n",
    );

    turnstile_cmd()
        .args(["app-constraints", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(0);
}

#[test]
fn ignore_exempts_named_dependencies_only() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\ndependencies = [\n    \"tatari-foo>=1.0\",\n    \"ignored~=1.0\",\n]\n",
    );

    // The non-ignored dependency still fails the application rule.
    turnstile_cmd()
        .args(["app-constraints", "--ignore", "ignored", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("tatari-foo"));
}

#[test]
fn every_violation_is_printed_before_the_status_returns() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\nrequires-python = \">=3.10\"\ndependencies = [\n    \"a>=1.0\",\n    \"b>=2.0\",\n]\n",
    );

    turnstile_cmd()
        .args(["app-constraints", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("a = \">=1.0\""))
        .stdout(predicates::str::contains("b = \">=2.0\""));
}

#[test]
fn package_profile_accepts_minimum_bounds() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\nrequires-python = \">=3.10\"\ndependencies = [\n    \"tatari-pyspark>=1.0.14\",\n]\n",
    );

    turnstile_cmd()
        .args(["pkg-constraints", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(0);
}

#[test]
fn missing_manifest_is_a_fatal_error() {
    let dir = temp_project();
    let missing = dir.path().join("pyproject.toml");

    turnstile_cmd()
        .args(["app-constraints", "--manifest"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicates::str::contains("io error"));
}

#[test]
fn poetry_app_profile_validates_the_nested_table() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[tool.poetry.dependencies]\npython = \"^3.10\"\n",
    );

    turnstile_cmd()
        .args(["poetry-app-constraints", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("python"));
}

#[test]
fn validation_is_idempotent() {
    let dir = temp_project();
    let manifest = write_file(
        dir.path(),
        "pyproject.toml",
        "[project]\nrequires-python = \">=3.10\"\ndependencies = []\n",
    );

    for _ in 0..2 {
        turnstile_cmd()
            .args(["app-constraints", "--manifest"])
            .arg(&manifest)
            .assert()
            .code(1);
    }
}

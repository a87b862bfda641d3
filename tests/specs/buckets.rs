//! Specs for the hardcoded-bucket hook.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn bucket_literal_fails_the_commit() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "conf.py",
        "BUCKET = \"tatari-datalake-dev-us-east-1\"\n",
    );

    turnstile_cmd()
        .arg("no-hardcoded-buckets")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("tatari-datalake-dev-us-east-1"));
}

#[test]
fn noqa_comment_clears_the_line() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "conf.py",
        "BUCKET = \"tatari-datalake-dev-us-east-1\"  # noqa: hardcoded-bucket\n",
    );

    turnstile_cmd()
        .arg("no-hardcoded-buckets")
        .arg(&file)
        .assert()
        .code(0);
}

#[test]
fn warn_only_reports_but_exits_zero() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "conf.py",
        "BUCKET = \"tatari-datalake-dev-us-east-1\"\n",
    );

    turnstile_cmd()
        .args(["no-hardcoded-buckets", "--warn-only"])
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicates::str::contains("tatari-datalake-dev-us-east-1"));
}

#[test]
fn suggest_appends_fix_guidance() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "conf.py",
        "BUCKET = \"tatari-datalake-dev-us-east-1\"\n",
    );

    turnstile_cmd()
        .args(["no-hardcoded-buckets", "--suggest"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("EnvironmentDefinition"));
}

#[test]
fn conditional_bucket_selection_is_flagged_in_both_branches() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "conf.py",
        "def get_bucket():\n    if is_production():\n        return \"tatari-scratch-useast1\"\n    else:\n        return \"tatari-scratch-dev-us-east-1\"\n",
    );

    let assert = turnstile_cmd()
        .arg("no-hardcoded-buckets")
        .arg(&file)
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let conditional_lines = stdout
        .lines()
        .filter(|l| l.contains("environment-conditional"))
        .count();
    assert_eq!(conditional_lines, 2);
}

#[test]
fn empty_file_list_is_a_clean_run() {
    turnstile_cmd()
        .arg("no-hardcoded-buckets")
        .assert()
        .code(0);
}

#[test]
fn config_file_can_extend_the_pattern_tables() {
    let dir = temp_project();
    let config = write_file(
        dir.path(),
        "turnstile.toml",
        "[buckets]\npatterns = [\"tatari-feature-store-\\\\w+\"]\n",
    );
    let file = write_file(
        dir.path(),
        "conf.py",
        "BUCKET = \"tatari-feature-store-prod\"\n",
    );

    turnstile_cmd()
        .arg("no-hardcoded-buckets")
        .args(["--config"])
        .arg(&config)
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("tatari-feature-store-prod"));
}

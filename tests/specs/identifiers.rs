//! Specs for the tree-scanning hooks.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

const SAMPLE: &str = "\
stringy = 'hello!!'
stringy.split('!!')
stringy.splitlines()
stringy.split('!!')  # tatari-noqa
";

#[test]
fn disallowed_function_calls_reports_file_line_and_column() {
    let dir = temp_project();
    let file = write_file(dir.path(), "sample.py", SAMPLE);

    turnstile_cmd()
        .args(["disallowed-function-calls", "--disallowed-function-calls", "split"])
        .args(["--replacement-function-calls", "splitlines", "--"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("sample.py:2:0"))
        .stdout(predicates::str::contains("split"))
        .stdout(predicates::str::contains("splitlines"));
}

#[test]
fn suppressed_lines_do_not_fail_the_hook() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "sample.py",
        "stringy = 'x'\nstringy.split('!!')  # tatari-noqa\n",
    );

    turnstile_cmd()
        .args(["disallowed-function-calls", "--disallowed-function-calls", "split"])
        .args(["--replacement-function-calls", "splitlines", "--"])
        .arg(&file)
        .assert()
        .code(0);
}

#[test]
fn mismatched_parallel_lists_fail_before_scanning() {
    let dir = temp_project();
    let file = write_file(dir.path(), "sample.py", SAMPLE);

    turnstile_cmd()
        .args(["disallowed-function-calls", "--disallowed-function-calls", "split", "replace"])
        .args(["--replacement-function-calls", "splitlines", "--"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicates::str::contains("does not match"));
}

#[test]
fn image_tag_branch_flags_keyword_overrides() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "dag.py",
        "op = DatabricksJobOperator(task_id='t', image_tag='pinned')\n",
    );

    turnstile_cmd()
        .arg("image-tag-branch")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("image_tag"));
}

#[test]
fn forbidden_imports_flags_module_level_imports() {
    let dir = temp_project();
    let file = write_file(dir.path(), "mod.py", "import legacy.client\n");

    turnstile_cmd()
        .args(["forbidden-imports", "--forbidden-classes", "legacy.client", "--"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("legacy.client"));
}

#[test]
fn json_format_emits_a_report_document() {
    let dir = temp_project();
    let file = write_file(dir.path(), "sample.py", SAMPLE);

    let assert = turnstile_cmd()
        .args(["disallowed-function-calls", "--format", "json"])
        .args(["--disallowed-function-calls", "split"])
        .args(["--replacement-function-calls", "splitlines", "--"])
        .arg(&file)
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["passed"], serde_json::json!(false));
    assert_eq!(doc["violations"][0]["rule"], "disallowed-function-call");
    assert_eq!(doc["violations"][0]["line"], 2);
}

//! Specs for the bulk hooks' graceful-skip semantics.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn boto3_import_fails_the_dag_file() {
    let dir = temp_project();
    let file = write_file(dir.path(), "dag.py", "import boto3\n");

    turnstile_cmd()
        .arg("no-boto3-in-airflow-dags")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("boto3"));
}

#[test]
fn unparsable_file_is_a_graceful_skip_for_boto3() {
    let dir = temp_project();
    let broken = write_file(dir.path(), "broken.py", "import boto3\ndef broken(:\n");

    turnstile_cmd()
        .arg("no-boto3-in-airflow-dags")
        .arg(&broken)
        .assert()
        .code(0);
}

#[test]
fn missing_file_is_a_graceful_skip_for_boto3() {
    let dir = temp_project();
    let missing = dir.path().join("missing.py");

    turnstile_cmd()
        .arg("no-boto3-in-airflow-dags")
        .arg(&missing)
        .assert()
        .code(0);
}

#[test]
fn suppressed_boto3_import_passes() {
    let dir = temp_project();
    let file = write_file(dir.path(), "dag.py", "import boto3  # tatari-noqa\n");

    turnstile_cmd()
        .arg("no-boto3-in-airflow-dags")
        .arg(&file)
        .assert()
        .code(0);
}

#[test]
fn non_spark_import_fails_only_inside_spark_projects() {
    let dir = temp_project();
    write_file(
        dir.path(),
        "pyproject.toml",
        "[tool.poetry.dependencies]\npyspark = \">=3.4\"\n",
    );
    let file = write_file(
        dir.path(),
        "jobs/etl.py",
        "from tatari_data_utils.buckets import EnvironmentDefinition\n",
    );

    turnstile_cmd()
        .arg("no-non-spark-buckets")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("buckets_spark"));
}

#[test]
fn the_same_import_passes_outside_spark_projects() {
    let dir = temp_project();
    write_file(
        dir.path(),
        "pyproject.toml",
        "[tool.poetry.dependencies]\nrequests = \">=2.0\"\n",
    );
    let file = write_file(
        dir.path(),
        "app/views.py",
        "from tatari_data_utils.buckets import EnvironmentDefinition\n",
    );

    turnstile_cmd()
        .arg("no-non-spark-buckets")
        .arg(&file)
        .assert()
        .code(0);
}

#[test]
fn dockerfile_without_a_poetry_pin_fails() {
    let dir = temp_project();
    let file = write_file(dir.path(), "Dockerfile", "RUN pip install poetry\n");

    turnstile_cmd()
        .arg("dockerfile-poetry")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("pinned"));
}

#[test]
fn recent_migration_with_generated_column_fails() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "20240501_totals.sql",
        "ALTER TABLE spots ADD COLUMN total numeric GENERATED ALWAYS AS (subtotal) STORED;\n",
    );

    turnstile_cmd()
        .arg("generated-columns")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("generated columns"));
}

#[test]
fn old_migrations_are_grandfathered() {
    let dir = temp_project();
    let file = write_file(
        dir.path(),
        "20230101_totals.sql",
        "ALTER TABLE spots ADD COLUMN total numeric GENERATED ALWAYS AS (subtotal) STORED;\n",
    );

    turnstile_cmd()
        .arg("generated-columns")
        .arg(&file)
        .assert()
        .code(0);
}

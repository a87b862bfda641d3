#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

use crate::test_utils::{temp_dir, write_file};

use yare::parameterized;

const PEP621: &str = r#"
[project]
name = "tatari-dag-app"
requires-python = "~=3.10"
dependencies = [
    "tatari-foo[dev]~=1.0",
    "tatari-bar>=2.0; sys_platform == 'linux'",
    "plain-name",
]
"#;

const POETRY: &str = r#"
[tool.poetry]
name = "tatari-legacy-app"

[tool.poetry.dependencies]
python = "~3.10"
tatari-metrics = "^1.0.1"
tatari-pyspark = { version = ">=1.0.14", extras = ["sql"] }
"#;

#[test]
fn pep621_schema_is_detected_by_project_dependencies() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "pyproject.toml", PEP621);

    let Manifest::Pep621(m) = Manifest::load(&path).unwrap() else {
        panic!("expected PEP 621 schema");
    };
    assert_eq!(m.requires_python.as_deref(), Some("~=3.10"));

    let deps = m.dependencies();
    assert_eq!(deps.len(), 2); // plain-name has no operator and is skipped
    assert_eq!(deps[0].name, "tatari-foo");
    assert_eq!(deps[0].constraint, "~=1.0");
    assert_eq!(deps[1].name, "tatari-bar");
    assert_eq!(deps[1].constraint, ">=2.0");
}

#[test]
fn poetry_schema_reads_the_nested_table() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "pyproject.toml", POETRY);

    let Manifest::Poetry(m) = Manifest::load(&path).unwrap() else {
        panic!("expected Poetry schema");
    };
    let find = |name: &str| {
        m.dependencies
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.constraint.as_str())
    };
    assert_eq!(find("python"), Some("~3.10"));
    assert_eq!(find("tatari-metrics"), Some("^1.0.1"));
    // Table values resolve through their version key.
    assert_eq!(find("tatari-pyspark"), Some(">=1.0.14"));
}

#[test]
fn pep621_wins_when_both_schemas_are_present() {
    let dir = temp_dir();
    let both = format!("{PEP621}\n{POETRY}");
    let path = write_file(dir.path(), "pyproject.toml", &both);
    assert!(matches!(
        Manifest::load(&path).unwrap(),
        Manifest::Pep621(_)
    ));
}

#[test]
fn missing_manifest_is_fatal() {
    let dir = temp_dir();
    let missing = dir.path().join("pyproject.toml");
    assert!(matches!(
        Manifest::load(&missing),
        Err(Error::Io { .. })
    ));
}

#[test]
fn malformed_toml_is_fatal() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "pyproject.toml", "not [ valid toml");
    assert!(matches!(
        Manifest::load(&path),
        Err(Error::Manifest { .. })
    ));
}

#[test]
fn unrecognized_schema_is_fatal() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "pyproject.toml", "[build-system]\nrequires = []\n");
    assert!(matches!(
        Manifest::load(&path),
        Err(Error::Manifest { .. })
    ));
}

#[test]
fn poetry_table_value_without_version_is_fatal() {
    let dir = temp_dir();
    let path = write_file(
        dir.path(),
        "pyproject.toml",
        "[tool.poetry.dependencies]\ndep = { extras = [\"sql\"] }\n",
    );
    assert!(matches!(
        Manifest::load(&path),
        Err(Error::Manifest { .. })
    ));
}

#[parameterized(
    extras = { "tatari-foo[dev]~=1.0", "tatari-foo", "~=1.0" },
    platform_marker = { "tatari-bar>=2.0; sys_platform == 'linux'", "tatari-bar", ">=2.0" },
    extras_and_marker = { "tatari-foo[dev]>=1.0; python_version < '3.12'", "tatari-foo", ">=1.0" },
    caret = { "legacy^0.3", "legacy", "^0.3" },
    exact_pin = { "pinned==2.4.1", "pinned", "==2.4.1" },
    spaced = { "  spaced ~= 1.2 ", "spaced", "~= 1.2" },
)]
fn split_requirement_extracts_name_and_constraint(raw: &str, name: &str, constraint: &str) {
    let dep = split_requirement(raw).unwrap();
    assert_eq!(dep.name, name);
    assert_eq!(dep.constraint, constraint);
}

#[test]
fn split_requirement_skips_operatorless_entries() {
    assert_eq!(split_requirement("plain-name"), None);
    assert_eq!(split_requirement(""), None);
}

#[test]
fn find_pyproject_walks_up_the_tree() {
    let dir = temp_dir();
    write_file(dir.path(), "pyproject.toml", POETRY);
    let nested = write_file(dir.path(), "dags/jobs/etl.py", "x = 1\n");

    let found = find_pyproject(&nested).unwrap();
    assert_eq!(found, dir.path().join("pyproject.toml"));
}

#[test]
fn find_pyproject_prefers_the_nearest_manifest() {
    let dir = temp_dir();
    write_file(dir.path(), "pyproject.toml", POETRY);
    write_file(dir.path(), "sub/pyproject.toml", POETRY);
    let nested = write_file(dir.path(), "sub/mod.py", "x = 1\n");

    let found = find_pyproject(&nested).unwrap();
    assert_eq!(found, dir.path().join("sub/pyproject.toml"));
}

#[test]
fn try_poetry_dependency_names_is_lenient() {
    let dir = temp_dir();
    let poetry = write_file(dir.path(), "poetry/pyproject.toml", POETRY);
    let pep621 = write_file(dir.path(), "pep621/pyproject.toml", PEP621);
    let missing = dir.path().join("missing/pyproject.toml");

    let names = try_poetry_dependency_names(&poetry).unwrap();
    assert!(names.iter().any(|n| n == "tatari-pyspark"));

    assert_eq!(try_poetry_dependency_names(&pep621), None);
    assert_eq!(try_poetry_dependency_names(&missing), None);
}

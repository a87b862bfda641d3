//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::Predicate;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns a Command configured to run the turnstile binary.
pub fn turnstile_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("turnstile"))
}

/// Creates a temp directory for spec fixtures.
pub fn temp_project() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Writes `content` to `name` under `root`, creating parents.
pub fn write_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates a temp directory for scratch files.
pub fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
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

/// A reporter that swallows output; unit tests assert on violations and
/// exit codes, not on the formatted stream.
pub fn quiet_reporter() -> crate::output::Reporter {
    crate::output::Reporter::new(
        crate::cli::OutputFormat::Json,
        termcolor::ColorChoice::Never,
    )
}

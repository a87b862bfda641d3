//! File classification for the bulk hooks.
//!
//! Bulk hooks receive whatever the pre-commit framework matched and must
//! themselves skip files outside their territory (non-Python files, old
//! migrations).

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Selector for Python source files.
pub struct PySelector {
    globs: GlobSet,
}

impl PySelector {
    pub fn new() -> Self {
        Self {
            globs: build_glob_set(&["*.py", "**/*.py"]),
        }
    }

    pub fn is_python(&self, path: &Path) -> bool {
        self.globs.is_match(path)
    }
}

impl Default for PySelector {
    fn default() -> Self {
        Self::new()
    }
}

fn build_glob_set(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;

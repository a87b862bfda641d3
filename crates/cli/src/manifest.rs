//! Dependency manifest (pyproject.toml) loading.
//!
//! Two historical schemas are in use across the monorepo: the legacy
//! Poetry nested-table schema (`[tool.poetry.dependencies]`) and the PEP
//! 621 flat list (`[project] dependencies = [...]`). The schema is
//! resolved once at load time into a tagged [`Manifest`], keyed on the
//! presence of `project.dependencies`; validators match on the variant
//! instead of probing raw tables.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};

/// Version operators recognized in PEP 508 requirement strings.
const VERSION_OP_PATTERN: &str = r"(~=|\^|>=|<=|==|!=|<|>)[^;]*";

/// One declared dependency with its raw constraint string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub constraint: String,
}

/// A loaded manifest, resolved to one schema.
pub enum Manifest {
    /// PEP 621: `[project]` with a flat `dependencies` list.
    Pep621(Pep621Manifest),
    /// Legacy Poetry: `[tool.poetry.dependencies]` nested table.
    Poetry(PoetryManifest),
}

pub struct Pep621Manifest {
    pub path: PathBuf,
    pub requires_python: Option<String>,
    requirements: Vec<String>,
}

pub struct PoetryManifest {
    pub path: PathBuf,
    /// (name, constraint) pairs in declaration order, `python` included.
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Load and schema-detect a manifest. Missing or malformed files are
    /// fatal: a broken manifest is a configuration bug in the calling
    /// repository, not user input to validate gracefully.
    pub fn load(path: &Path) -> Result<Manifest> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(project) = table.get("project").and_then(|v| v.as_table())
            && project.contains_key("dependencies")
        {
            return Ok(Manifest::Pep621(Pep621Manifest {
                path: path.to_path_buf(),
                requires_python: project
                    .get("requires-python")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
                requirements: project
                    .get("dependencies")
                    .and_then(|v| v.as_array())
                    .map(|deps| {
                        deps.iter()
                            .filter_map(|d| d.as_str())
                            .map(|s| s.to_string())
                            .collect()
                    })
                    .unwrap_or_default(),
            }));
        }

        if let Some(deps) = table
            .get("tool")
            .and_then(|v| v.get("poetry"))
            .and_then(|v| v.get("dependencies"))
            .and_then(|v| v.as_table())
        {
            let mut dependencies = Vec::new();
            for (name, value) in deps {
                let constraint = poetry_constraint(path, name, value)?;
                dependencies.push(Dependency {
                    name: name.clone(),
                    constraint,
                });
            }
            return Ok(Manifest::Poetry(PoetryManifest {
                path: path.to_path_buf(),
                dependencies,
            }));
        }

        Err(Error::Manifest {
            path: path.to_path_buf(),
            message: "no recognized dependency schema (neither project.dependencies \
                      nor tool.poetry.dependencies)"
                .to_string(),
        })
    }
}

impl Pep621Manifest {
    /// Declared dependencies with a recognizable version operator.
    /// Entries without one (e.g. bare names, URL requirements) are skipped.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.requirements
            .iter()
            .filter_map(|raw| split_requirement(raw))
            .collect()
    }
}

/// Split a PEP 508 requirement string into name and constraint.
///
/// Platform markers after `;` are dropped, extras in brackets are stripped
/// from the name, and the constraint is everything from the first version
/// operator on. `tatari-foo[dev]~=1.0; sys_platform == "linux"` becomes
/// ("tatari-foo", "~=1.0").
pub fn split_requirement(raw: &str) -> Option<Dependency> {
    // The operator table is fixed; compiling it cannot fail.
    let op_re = Regex::new(VERSION_OP_PATTERN).ok()?;

    let mut spec = raw.trim();
    if let Some((head, _markers)) = spec.split_once(';') {
        spec = head.trim();
    }

    let m = op_re.find(spec)?;
    let constraint = m.as_str().trim().to_string();
    let mut name = spec[..m.start()].trim();
    if let Some((bare, _extras)) = name.split_once('[') {
        name = bare.trim();
    }

    Some(Dependency {
        name: name.to_string(),
        constraint,
    })
}

/// Poetry dependency values are either a bare constraint string or a table
/// carrying a `version` key (`dep = { version = "^1.0", extras = [...] }`).
fn poetry_constraint(path: &Path, name: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Table(t) => t
            .get("version")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Manifest {
                path: path.to_path_buf(),
                message: format!("dependency '{name}' has no version key"),
            }),
        other => Err(Error::Manifest {
            path: path.to_path_buf(),
            message: format!("dependency '{name}' has unsupported value: {other}"),
        }),
    }
}

/// Nearest pyproject.toml at or above `start`, if any.
pub fn find_pyproject(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };
    // Relative paths still need at least one probe at their own level.
    loop {
        let candidate = current.join("pyproject.toml");
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Poetry dependency names from the manifest, or None when the file is
/// unreadable or uses another schema. Bulk hooks treat None as "not a
/// project we police".
pub fn try_poetry_dependency_names(path: &Path) -> Option<Vec<String>> {
    match Manifest::load(path) {
        Ok(Manifest::Poetry(poetry)) => {
            Some(poetry.dependencies.into_iter().map(|d| d.name).collect())
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

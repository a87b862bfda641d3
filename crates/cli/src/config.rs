//! Configuration parsing and validation.
//!
//! Handles turnstile.toml parsing with version validation and unknown key
//! warnings. Everything is optional: hooks run with built-in defaults when
//! no config file exists. CLI flags always win over config values.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config filename probed in the invocation directory.
pub const CONFIG_FILENAME: &str = "turnstile.toml";

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    #[serde(default = "default_version")]
    version: i64,

    #[serde(default)]
    suppress: Option<toml::Value>,

    #[serde(default)]
    buckets: Option<toml::Value>,

    #[serde(default)]
    spark: Option<toml::Value>,

    #[serde(default)]
    constraints: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

fn default_version() -> i64 {
    1
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1 when present).
    #[serde(default = "default_version")]
    pub version: i64,

    /// Suppression marker settings.
    #[serde(default)]
    pub suppress: SuppressConfig,

    /// Bucket-hook pattern extensions.
    #[serde(default)]
    pub buckets: BucketsConfig,

    /// Spark-project detection settings.
    #[serde(default)]
    pub spark: SparkConfig,

    /// Constraint-validator settings.
    #[serde(default)]
    pub constraints: ConstraintsConfig,
}

/// Suppression marker configuration.
#[derive(Debug, Deserialize)]
pub struct SuppressConfig {
    /// Marker substring recognized on violating lines.
    #[serde(default = "SuppressConfig::default_marker")]
    pub marker: String,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            marker: Self::default_marker(),
        }
    }
}

impl SuppressConfig {
    fn default_marker() -> String {
        crate::suppress::DEFAULT_MARKER.to_string()
    }
}

/// Extra patterns appended to the built-in bucket tables.
#[derive(Debug, Default, Deserialize)]
pub struct BucketsConfig {
    /// Additional bucket-name patterns.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Additional region patterns.
    #[serde(default)]
    pub regions: Vec<String>,

    /// Additional environment-predicate names.
    #[serde(default)]
    pub env_checks: Vec<String>,
}

/// Dependencies that mark a project as Spark-flavored.
#[derive(Debug, Deserialize)]
pub struct SparkConfig {
    #[serde(default = "SparkConfig::default_dependencies")]
    pub dependencies: Vec<String>,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            dependencies: Self::default_dependencies(),
        }
    }
}

impl SparkConfig {
    fn default_dependencies() -> Vec<String> {
        [
            "python-tatari-pyspark",
            "python-tatari-ml-utils",
            "tatari-pyspark",
            "tatari-ml-utils",
            "pyspark",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

/// Dependencies exempted from package-level constraint rules, merged with
/// any `--ignore` flags at the call site.
#[derive(Debug, Default, Deserialize)]
pub struct ConstraintsConfig {
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse; the probed default path is
    /// optional. Unknown top-level keys warn rather than fail, so configs
    /// written for newer turnstile versions degrade gracefully.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let probe = Path::new(CONFIG_FILENAME);
                if !probe.exists() {
                    return Ok(Config::default());
                }
                probe.to_path_buf()
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::Config {
            message: format!("cannot read config: {e}"),
            path: Some(path.clone()),
        })?;
        Self::parse(&content, &path)
    }

    fn parse(content: &str, path: &Path) -> Result<Config> {
        let flexible: FlexibleConfig =
            toml::from_str(content).map_err(|e| Error::Config {
                message: e.to_string(),
                path: Some(path.to_path_buf()),
            })?;

        if flexible.version != 1 {
            return Err(Error::Config {
                message: format!("unsupported config version {}", flexible.version),
                path: Some(path.to_path_buf()),
            });
        }

        for key in flexible.unknown.keys() {
            tracing::warn!(key = %key, "unknown config key ignored");
        }

        toml::from_str(content).map_err(|e| Error::Config {
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

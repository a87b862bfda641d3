// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! CLI argument parsing with clap derive.
//!
//! One subcommand per hook. The pre-commit framework appends the changed
//! file list after the hook's own flags; multi-value flags therefore need
//! a `--` separator in hook configuration, e.g.
//! `args: ['--disallowed-attributes', 'split', '--']`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::checks::identifiers::NameKind;

/// Pre-commit policy hooks for the Tatari Python monorepo
#[derive(Parser)]
#[command(name = "turnstile")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "TURNSTILE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Force color output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flag attribute accesses for replacement
    DisallowedAttributes(DisallowedArgs),
    /// Flag method calls for replacement
    DisallowedFunctionCalls(DisallowedArgs),
    /// Flag identifiers of a chosen kind for replacement
    DisallowedIdentifiers(IdentifierArgs),
    /// Reject module-level imports of named modules or classes
    ForbiddenImports(ForbiddenImportsArgs),
    /// Reject direct boto3 imports in Airflow DAG files
    NoBoto3InAirflowDags(FilesArgs),
    /// Detect hardcoded bucket names, regions, and conditional bucket logic
    NoHardcodedBuckets(BucketsArgs),
    /// Reject non-Spark bucket imports in PySpark/ML projects
    NoNonSparkBuckets(FilesArgs),
    /// Reject image_tag/branch keyword overrides on Databricks operators
    ImageTagBranch(FilesArgs),
    /// Reject generated columns in recent Postgres migrations
    GeneratedColumns(FilesArgs),
    /// Require a pinned poetry version in Dockerfiles
    DockerfilePoetry(FilesArgs),
    /// Validate application dependency constraints (PEP 621)
    AppConstraints(ConstraintArgs),
    /// Validate package dependency constraints (PEP 621)
    PkgConstraints(ConstraintArgs),
    /// Validate application dependency constraints (legacy Poetry)
    PoetryAppConstraints(ConstraintArgs),
    /// Validate package dependency constraints (legacy Poetry)
    PoetryPkgConstraints(ConstraintArgs),
    /// Validate only the python constraint (legacy Poetry packages)
    PoetryPkgDepConstraints(ConstraintArgs),
    /// Validate the current branch name
    ValidateBranchName,
}

/// Parallel disallowed/replacement name lists plus the file list.
#[derive(clap::Args)]
pub struct DisallowedArgs {
    /// Names to flag
    #[arg(
        long = "disallowed-attributes",
        visible_alias = "disallowed-function-calls",
        num_args = 1..,
        required = true,
        value_name = "NAME"
    )]
    pub disallowed: Vec<String>,

    /// Replacement suggestions, one per disallowed name
    #[arg(
        long = "replacement-attributes",
        visible_alias = "replacement-function-calls",
        num_args = 1..,
        required = true,
        value_name = "NAME"
    )]
    pub replacements: Vec<String>,

    /// Files to check
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct IdentifierArgs {
    /// Which identifier kind to flag
    #[arg(long, value_enum)]
    pub identifier: NameKind,

    /// Names to flag
    #[arg(long, num_args = 1.., required = true, value_name = "NAME")]
    pub disallowed: Vec<String>,

    /// Replacement suggestions, one per disallowed name
    #[arg(long, num_args = 1.., required = true, value_name = "NAME")]
    pub replacements: Vec<String>,

    /// Files to check
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct ForbiddenImportsArgs {
    /// Module or class names whose import is forbidden
    #[arg(long = "forbidden-classes", num_args = 1.., required = true, value_name = "NAME")]
    pub forbidden: Vec<String>,

    /// Files to check
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Hooks that take only a file list.
#[derive(clap::Args)]
pub struct FilesArgs {
    /// Files to check
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct BucketsArgs {
    /// Print violations but exit 0
    #[arg(long)]
    pub warn_only: bool,

    /// Include suggested fixes in output
    #[arg(long)]
    pub suggest: bool,

    /// Disable detection of hardcoded region strings
    #[arg(long)]
    pub no_regions: bool,

    /// Files to check
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct ConstraintArgs {
    /// Dependencies exempt from the package-level rule
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Manifest to validate
    #[arg(long, default_value = "pyproject.toml", value_name = "PATH")]
    pub manifest: PathBuf,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Branch name validation (`validate-branch-name`).
//!
//! Branch names become docker image tags, so they must be valid tag
//! syntax (plus forward slashes) and at most 50 characters.

use regex::Regex;

use crate::error::{Error, ExitCode, Result};

/// Allowed branch-name syntax. The leading-character restriction (no `-`
/// or `.`) is checked separately; the regex crate has no lookahead.
const BRANCH_CHARSET_PATTERN: &str = r"^[a-zA-Z0-9._/-]{1,50}$";

pub const ERROR_MESSAGE: &str = "branch name can't start with a hyphen or period, \
    can't be more than 50 characters, and can only contain letters, numbers, \
    and the special characters: ._-/";

/// `validate-branch-name` entry point.
pub fn run() -> Result<ExitCode> {
    let branch = current_branch()?;
    tracing::debug!(branch = %branch, "validating branch name");

    if validate_branch_name(&branch)? {
        Ok(ExitCode::Clean)
    } else {
        eprintln!("{ERROR_MESSAGE}");
        Ok(ExitCode::Fail)
    }
}

/// True when `branch` satisfies the naming policy.
pub fn validate_branch_name(branch: &str) -> Result<bool> {
    let charset = Regex::new(BRANCH_CHARSET_PATTERN).map_err(|e| Error::Config {
        message: format!("invalid pattern: {e}"),
        path: None,
    })?;

    Ok(!branch.starts_with('-') && !branch.starts_with('.') && charset.is_match(branch))
}

/// The branch under validation.
///
/// GitHub Actions does a shallow clone where HEAD is detached, so
/// `GITHUB_REF_NAME` wins when set; otherwise the repository containing
/// the working directory supplies its HEAD shorthand.
fn current_branch() -> Result<String> {
    if let Ok(branch) = std::env::var("GITHUB_REF_NAME")
        && !branch.is_empty()
    {
        return Ok(branch);
    }

    let repo = git2::Repository::discover(".")?;
    let head = repo.head()?;
    Ok(head.shorthand().unwrap_or("HEAD").to_string())
}

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;

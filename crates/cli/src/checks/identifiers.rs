// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Disallowed attribute, function-call, and identifier hooks.
//!
//! Flags syntax-tree nodes whose name exactly equals an entry in a
//! caller-supplied disallowed list and suggests the replacement at the
//! same index. Three CLI surfaces share one rule: `disallowed-attributes`
//! and `disallowed-function-calls` are fixed-kind variants of
//! `disallowed-identifiers --identifier <kind>`.

use std::path::PathBuf;

use tree_sitter::Node;

use crate::cli::{DisallowedArgs, IdentifierArgs};
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::output::Reporter;
use crate::pytree::{self, PyTree};
use crate::scan::{self, NodeRule, RuleList};
use crate::violation::Violation;

/// Which node names a scan flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NameKind {
    /// Method-call names (`obj.method(...)`).
    Function,
    /// Attribute-access names (`obj.attr`).
    Attribute,
}

impl NameKind {
    fn label(self) -> &'static str {
        match self {
            NameKind::Function => "function call",
            NameKind::Attribute => "attribute",
        }
    }

    fn rule(self) -> &'static str {
        match self {
            NameKind::Function => "disallowed-function-call",
            NameKind::Attribute => "disallowed-attribute",
        }
    }
}

/// Name-equality rule over one node kind.
pub struct DisallowedNames {
    kind: NameKind,
    list: RuleList,
}

impl DisallowedNames {
    pub fn new(kind: NameKind, disallowed: Vec<String>, replacements: Vec<String>) -> Result<Self> {
        Ok(Self {
            kind,
            list: RuleList::new(disallowed, replacements)?,
        })
    }
}

impl NodeRule for DisallowedNames {
    fn inspect(&self, tree: &PyTree, node: Node<'_>) -> Vec<Violation> {
        let name = match self.kind {
            NameKind::Function => pytree::call_method_name(tree, node),
            NameKind::Attribute => pytree::attribute_name(tree, node),
        };
        let Some(name) = name else {
            return Vec::new();
        };
        let Some(replacement) = self.list.replacement_for(name) else {
            return Vec::new();
        };
        vec![
            Violation::at(
                self.kind.rule(),
                tree.path(),
                pytree::line(node),
                pytree::column(node),
                name,
                format!(
                    "flagged {} `{}`; replace with `{}`",
                    self.kind.label(),
                    name,
                    replacement
                ),
            )
            .with_replacement(replacement),
        ]
    }
}

/// `disallowed-attributes` / `disallowed-function-calls` entry point.
pub fn run_fixed(
    kind: NameKind,
    args: &DisallowedArgs,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    check_files(
        kind,
        args.disallowed.clone(),
        args.replacements.clone(),
        &args.files,
        config,
        reporter,
    )
}

/// `disallowed-identifiers` entry point.
pub fn run_identifiers(
    args: &IdentifierArgs,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    check_files(
        args.identifier,
        args.disallowed.clone(),
        args.replacements.clone(),
        &args.files,
        config,
        reporter,
    )
}

fn check_files(
    kind: NameKind,
    disallowed: Vec<String>,
    replacements: Vec<String>,
    files: &[PathBuf],
    config: &Config,
    reporter: &mut Reporter,
) -> Result<ExitCode> {
    // Parallel-list mismatch fails here, before any file is opened.
    let rule = DisallowedNames::new(kind, disallowed, replacements)?;

    let mut code = ExitCode::Clean;
    for file in files {
        tracing::debug!(file = %file.display(), "scanning");
        let violations = scan::scan_file(file, &[&rule], &config.suppress.marker)?;
        reporter.report(&violations)?;
        code = code.and(ExitCode::from_violations(violations.len()));
    }
    Ok(code)
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Deploy-operator keyword constraint hook (`image-tag-branch`).
//!
//! Deploy tags are pinned by the release pipeline; DAG authors must not
//! override them per-operator. Flags any call to a Databricks operator
//! constructor that passes `image_tag` or `branch` as a keyword argument,
//! regardless of the value.

use tree_sitter::Node;

use crate::cli::FilesArgs;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::output::Reporter;
use crate::pytree::{self, PyTree};
use crate::scan::{self, NodeRule};
use crate::violation::Violation;

/// Operator constructors whose tags are pipeline-managed.
pub const OPERATOR_NAMES: &[&str] = &[
    "DatabricksJobOperator",
    "DatabricksImageRepo",
    "DatabricksSharedOperator",
    "DatabricksNotebookOperator",
];

/// Keyword arguments callers must not set.
pub const FORBIDDEN_KEYWORDS: &[&str] = &["image_tag", "branch"];

struct KeywordConstraint;

impl NodeRule for KeywordConstraint {
    fn inspect(&self, tree: &PyTree, node: Node<'_>) -> Vec<Violation> {
        let Some(operator) = pytree::call_identifier(tree, node) else {
            return Vec::new();
        };
        if !OPERATOR_NAMES.contains(&operator) {
            return Vec::new();
        }
        let Some(arguments) = node.child_by_field_name("arguments") else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        let mut cursor = arguments.walk();
        for argument in arguments.children(&mut cursor) {
            if argument.kind() != "keyword_argument" {
                continue;
            }
            let Some(name_node) = argument.child_by_field_name("name") else {
                continue;
            };
            let keyword = tree.text(name_node);
            if FORBIDDEN_KEYWORDS.contains(&keyword) {
                violations.push(Violation::at(
                    "image-tag-branch",
                    tree.path(),
                    pytree::line(argument),
                    pytree::column(argument),
                    keyword,
                    format!("keyword `{keyword}` must not be set on `{operator}`"),
                ));
            }
        }
        violations
    }
}

/// `image-tag-branch` entry point.
pub fn run(args: &FilesArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    let rule = KeywordConstraint;
    let mut code = ExitCode::Clean;
    for file in &args.files {
        let violations = scan::scan_file(file, &[&rule], &config.suppress.marker)?;
        reporter.report(&violations)?;
        code = code.and(ExitCode::from_violations(violations.len()));
    }
    Ok(code)
}

#[cfg(test)]
#[path = "operators_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Import policy hooks.
//!
//! `forbidden-imports` is strict: it inspects module-level imports only,
//! fails the file on the first flagged name, and treats unparsable input
//! as fatal. `no-boto3-in-airflow-dags` is a bulk hook: it walks the whole
//! tree, honors the inline suppression marker, and treats unreadable or
//! unparsable files as contributing zero violations so one malformed file
//! does not block the commit.

use tree_sitter::Node;

use crate::cli::{FilesArgs, ForbiddenImportsArgs};
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::files::PySelector;
use crate::output::Reporter;
use crate::pytree::{self, PyTree};
use crate::violation::Violation;

/// Imported names of an `import ...` statement (full dotted paths).
fn import_names<'t>(tree: &'t PyTree, node: Node<'t>) -> Vec<&'t str> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|n| match n.kind() {
            "dotted_name" => Some(tree.text(n)),
            "aliased_import" => n.child_by_field_name("name").map(|inner| tree.text(inner)),
            _ => None,
        })
        .collect()
}

/// The module a `from ... import ...` statement imports from.
fn import_from_module<'t>(tree: &'t PyTree, node: Node<'t>) -> Option<&'t str> {
    node.child_by_field_name("module_name")
        .map(|n| tree.text(n))
}

/// `forbidden-imports` entry point.
pub fn run_forbidden(args: &ForbiddenImportsArgs, reporter: &mut Reporter) -> Result<ExitCode> {
    let mut code = ExitCode::Clean;
    for file in &args.files {
        let tree = PyTree::parse_file(file)?;
        if let Some(violation) = first_forbidden_import(&tree, &args.forbidden) {
            reporter.report(std::slice::from_ref(&violation))?;
            code = ExitCode::Fail;
        }
    }
    Ok(code)
}

/// First module-level import (or imported name) matching the forbidden
/// list. Nested imports inside functions are deliberately out of scope.
fn first_forbidden_import(tree: &PyTree, forbidden: &[String]) -> Option<Violation> {
    let root = tree.root();
    let mut cursor = root.walk();
    for stmt in root.children(&mut cursor) {
        let names = match stmt.kind() {
            "import_statement" | "import_from_statement" => import_names(tree, stmt),
            _ => continue,
        };
        for name in names {
            if forbidden.iter().any(|f| f == name) {
                return Some(Violation::at(
                    "forbidden-import",
                    tree.path(),
                    pytree::line(stmt),
                    pytree::column(stmt),
                    name,
                    format!("flagged import of `{name}`"),
                ));
            }
        }
    }
    None
}

/// `no-boto3-in-airflow-dags` entry point.
pub fn run_boto3(args: &FilesArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    let selector = PySelector::new();
    let mut total = 0usize;
    for file in &args.files {
        if !selector.is_python(file) {
            continue;
        }
        let Some(tree) = PyTree::try_parse_file(file) else {
            continue;
        };
        let violations = boto3_violations(&tree, &config.suppress.marker);
        reporter.report(&violations)?;
        total += violations.len();
    }
    Ok(ExitCode::from_violations(total))
}

const BOTO3_ADVICE: &str = "direct boto3 import; run AWS access inside a \
    BaseKubernetesPodOperator subclass and pass the s3 prefix through xCom";

fn boto3_violations(tree: &PyTree, marker: &str) -> Vec<Violation> {
    let lines: Vec<&str> = tree.source().lines().collect();
    let mut violations = Vec::new();

    for node in tree.nodes() {
        let flagged = match node.kind() {
            "import_statement" => import_names(tree, node)
                .into_iter()
                .find(|&n| is_boto3(n))
                .map(|n| n.to_string()),
            "import_from_statement" => import_from_module(tree, node)
                .filter(|&m| is_boto3(m))
                .map(|m| m.to_string()),
            _ => None,
        };
        let Some(name) = flagged else {
            continue;
        };

        // Inline suppression: the marker anywhere on the import line wins.
        let line_no = pytree::line(node);
        let line_text = lines.get(line_no as usize - 1).copied().unwrap_or("");
        if line_text.contains(marker) {
            continue;
        }

        violations.push(Violation::at(
            "boto3-import",
            tree.path(),
            line_no,
            pytree::column(node),
            name,
            BOTO3_ADVICE,
        ));
    }

    violations
}

fn is_boto3(module: &str) -> bool {
    module == "boto3" || module.starts_with("boto3.")
}

#[cfg(test)]
#[path = "imports_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Hardcoded bucket detection (`no-hardcoded-buckets`).
//!
//! Prevents configuration sprawl by flagging:
//! 1. Hardcoded bucket name literals (regex, line scan)
//! 2. Hardcoded region strings (regex, line scan, `--no-regions` disables)
//! 3. Environment-conditional bucket selection (tree scan): an if/ternary
//!    whose condition calls an environment predicate and whose branches
//!    assign or return a bucket-matching string literal — flagged even
//!    though neither branch alone is an always-wrong literal.
//!
//! Comment and docstring lines are skipped, `# noqa: hardcoded-bucket`
//! exempts a line, and violations dedupe by (file, line, column, rule).

use std::fs;
use std::path::Path;

use tree_sitter::Node;

use crate::cli::BucketsArgs;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::output::Reporter;
use crate::pattern::{BucketRules, DocstringTracker, LineClass};
use crate::pytree::{self, PyTree};
use crate::violation::{self, Violation};

const RULE_BUCKET: &str = "hardcoded-bucket";
const RULE_REGION: &str = "hardcoded-region";
const RULE_CONDITIONAL: &str = "conditional-bucket";

/// `no-hardcoded-buckets` entry point.
pub fn run(args: &BucketsArgs, config: &Config, reporter: &mut Reporter) -> Result<ExitCode> {
    let rules = BucketRules::compile(
        &config.buckets.patterns,
        &config.buckets.regions,
        &config.buckets.env_checks,
    )?;

    let mut total = 0usize;
    for file in &args.files {
        let mut violations = check_file(file, &rules, !args.no_regions);
        if args.suggest {
            for v in &mut violations {
                let guidance = suggestion(v);
                v.suggestion = Some(guidance);
            }
        }
        reporter.report(&violations)?;
        total += violations.len();
    }

    if args.warn_only {
        return Ok(ExitCode::Clean);
    }
    Ok(ExitCode::from_violations(total))
}

/// Check one file. Unreadable files contribute zero violations: this hook
/// scans many files opportunistically and must not block the commit on a
/// single bad read.
pub fn check_file(path: &Path, rules: &BucketRules, check_regions: bool) -> Vec<Violation> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error reading {}: {e}", path.display());
            return Vec::new();
        }
    };

    // Literal prescan: clean files skip both passes.
    if !rules.may_match(&content) {
        return Vec::new();
    }

    let mut violations = line_violations(path, &content, rules, check_regions);
    violations.extend(conditional_violations(path, &content, rules));
    violation::dedupe(violations)
}

/// Regex pass over code lines.
fn line_violations(
    path: &Path,
    content: &str,
    rules: &BucketRules,
    check_regions: bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut tracker = DocstringTracker::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;

        if tracker.classify(line) == LineClass::Skip {
            continue;
        }
        if rules.has_noqa(line) {
            continue;
        }

        for m in rules.bucket().find_iter(line) {
            violations.push(Violation::at(
                RULE_BUCKET,
                path,
                line_no,
                m.start() as u32,
                m.as_str(),
                format!("hardcoded bucket `{}` detected", m.as_str()),
            ));
        }

        // Region hits on a line that already carries a bucket match are
        // part of the bucket name; the bucket violation covers them.
        if check_regions && !rules.bucket().is_match(line) {
            for m in rules.region().find_iter(line) {
                violations.push(Violation::at(
                    RULE_REGION,
                    path,
                    line_no,
                    m.start() as u32,
                    m.as_str(),
                    format!("hardcoded region `{}` detected", m.as_str()),
                ));
            }
        }
    }

    violations
}

/// Tree pass for environment-conditional bucket selection. Unparsable
/// files fall back to the regex-only result.
fn conditional_violations(path: &Path, content: &str, rules: &BucketRules) -> Vec<Violation> {
    let Ok(tree) = PyTree::parse_source(content.to_string(), path) else {
        return Vec::new();
    };

    let mut violations = Vec::new();
    for node in tree.nodes() {
        match node.kind() {
            "if_statement" => flag_if_statement(&tree, node, rules, &mut violations),
            "conditional_expression" => flag_ternary(&tree, node, rules, &mut violations),
            _ => {}
        }
    }
    violations
}

/// An `if`/`elif`/`else` chain. Each branch body is scanned when its
/// governing condition is an environment predicate; the `else` body is
/// governed by the last condition in the chain.
fn flag_if_statement(
    tree: &PyTree,
    node: Node<'_>,
    rules: &BucketRules,
    violations: &mut Vec<Violation>,
) {
    let mut conditions = Vec::new();
    if let Some(cond) = node.child_by_field_name("condition") {
        if let Some(block) = node.child_by_field_name("consequence") {
            conditions.push((cond, block));
        }
    }

    let mut else_block = None;
    let mut cursor = node.walk();
    for alt in node.children_by_field_name("alternative", &mut cursor) {
        match alt.kind() {
            "elif_clause" => {
                if let (Some(cond), Some(block)) = (
                    alt.child_by_field_name("condition"),
                    alt.child_by_field_name("consequence"),
                ) {
                    conditions.push((cond, block));
                }
            }
            "else_clause" => {
                else_block = alt.child_by_field_name("body");
            }
            _ => {}
        }
    }

    for (i, (cond, block)) in conditions.iter().enumerate() {
        if !is_env_check(tree, *cond, rules) {
            continue;
        }
        flag_branch_body(tree, *block, rules, violations);
        let is_last = i == conditions.len() - 1;
        if is_last && let Some(else_body) = else_block {
            flag_branch_body(tree, else_body, rules, violations);
        }
    }
}

/// Direct statements of a branch body: assignments and returns of a
/// bucket-matching string literal. Nested blocks are reached by the outer
/// walk, not here.
fn flag_branch_body(
    tree: &PyTree,
    block: Node<'_>,
    rules: &BucketRules,
    violations: &mut Vec<Violation>,
) {
    let mut cursor = block.walk();
    for stmt in block.named_children(&mut cursor) {
        let (anchor, value) = match stmt.kind() {
            "expression_statement" => {
                let Some(assign) = stmt.named_child(0).filter(|n| n.kind() == "assignment") else {
                    continue;
                };
                let Some(right) = assign.child_by_field_name("right") else {
                    continue;
                };
                (assign, right)
            }
            "return_statement" => {
                let Some(value) = stmt.named_child(0) else {
                    continue;
                };
                (stmt, value)
            }
            _ => continue,
        };

        if let Some(text) = pytree::string_value(tree, value)
            && rules.bucket().is_match(&text)
        {
            violations.push(conditional_violation(tree, anchor, &text));
        }
    }
}

/// A ternary whose condition is an environment predicate; both value arms
/// are checked.
fn flag_ternary(
    tree: &PyTree,
    node: Node<'_>,
    rules: &BucketRules,
    violations: &mut Vec<Violation>,
) {
    let (Some(body), Some(condition), Some(orelse)) =
        (node.named_child(0), node.named_child(1), node.named_child(2))
    else {
        return;
    };
    if !is_env_check(tree, condition, rules) {
        return;
    }

    for arm in [body, orelse] {
        if let Some(text) = pytree::string_value(tree, arm)
            && rules.bucket().is_match(&text)
        {
            violations.push(conditional_violation(tree, node, &text));
        }
    }
}

fn conditional_violation(tree: &PyTree, anchor: Node<'_>, matched: &str) -> Violation {
    Violation::at(
        RULE_CONDITIONAL,
        tree.path(),
        pytree::line(anchor),
        pytree::column(anchor),
        matched,
        "environment-conditional bucket logic detected",
    )
}

/// True when the node is a call to a recognized environment predicate,
/// plain (`is_production()`) or qualified (`env.is_production()`).
fn is_env_check(tree: &PyTree, node: Node<'_>, rules: &BucketRules) -> bool {
    if node.kind() != "call" {
        return false;
    }
    let Some(func) = node.child_by_field_name("function") else {
        return false;
    };
    let name = match func.kind() {
        "identifier" => Some(tree.text(func)),
        "attribute" => pytree::attribute_name(tree, func),
        _ => None,
    };
    name.is_some_and(|n| rules.is_env_check(n))
}

/// Fix guidance attached under `--suggest`.
fn suggestion(v: &Violation) -> String {
    if v.rule == RULE_CONDITIONAL {
        return "avoid `if is_production(): bucket = \"tatari-...\"`; the bucket \
                utilities handle environment detection:\n\
                  from tatari_data_utils import EnvironmentDefinition\n\
                  bucket = EnvironmentDefinition.get_default_buckets_for_env().datalake"
            .to_string();
    }

    let accessor = if v.name.contains("datalake") && v.name.contains("temp") {
        ".temp or .temp['region']"
    } else if v.name.contains("datalake") {
        ".datalake"
    } else if v.name.contains("scratch") {
        ".scratch or .scratch['region']"
    } else if v.name.contains("gx") {
        ".gx"
    } else if v.name.contains("xcom") {
        ".xcom"
    } else {
        ".<bucket_type>"
    };

    format!(
        "use the centralized bucket utilities instead:\n\
         \n\
         for PySpark/Databricks jobs:\n\
           from tatari_pyspark.utils.buckets import DefaultBuckets\n\
           bucket = DefaultBuckets.get_from_environment().scratch['us-east-1']\n\
         \n\
         for other Python code:\n\
           from tatari_data_utils import EnvironmentDefinition\n\
           bucket = EnvironmentDefinition.get_default_buckets_for_env(){accessor}"
    )
}

#[cfg(test)]
#[path = "buckets_tests.rs"]
mod tests;

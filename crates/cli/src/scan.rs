// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Shared tree-walk-and-flag scanner.
//!
//! Every tree-scanning hook is the same loop: walk each node in document
//! order, ask a rule whether the node is flaggable, collect violations,
//! then drop the ones whose line carries the suppression marker. The loop
//! lives here once; hooks supply a [`NodeRule`].

use std::path::Path;

use tree_sitter::Node;

use crate::error::{Error, Result};
use crate::pytree::PyTree;
use crate::suppress;
use crate::violation::Violation;

/// What counts as a flaggable node for one hook.
pub trait NodeRule {
    /// Inspect one node; return a violation if it matches.
    ///
    /// A rule may produce several violations for one node (e.g. one per
    /// offending keyword argument), hence the Vec.
    fn inspect(&self, tree: &PyTree, node: Node<'_>) -> Vec<Violation>;
}

/// Walk the whole tree and collect everything the rules flag, in the
/// order the walk encountered it.
pub fn collect(tree: &PyTree, rules: &[&dyn NodeRule]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for node in tree.nodes() {
        for rule in rules {
            violations.extend(rule.inspect(tree, node));
        }
    }
    violations
}

/// Parse a file, run the rules, and apply the suppression pass.
///
/// Strict-hook semantics: unreadable or unparsable files propagate errors.
pub fn scan_file(path: &Path, rules: &[&dyn NodeRule], marker: &str) -> Result<Vec<Violation>> {
    let tree = PyTree::parse_file(path)?;
    let violations = collect(&tree, rules);
    suppress::drop_suppressed(path, violations, marker)
}

/// A pairing of disallowed names with their suggested replacements.
///
/// Supplied per invocation as two parallel argument lists; lookups are
/// first-match by equality.
pub struct RuleList {
    disallowed: Vec<String>,
    replacements: Vec<String>,
}

impl RuleList {
    /// Build from parallel lists; mismatched lengths fail fast, before any
    /// scanning begins.
    pub fn new(disallowed: Vec<String>, replacements: Vec<String>) -> Result<Self> {
        if disallowed.len() != replacements.len() {
            return Err(Error::Argument(format!(
                "number of replacements ({}) does not match the number to check ({})",
                replacements.len(),
                disallowed.len()
            )));
        }
        Ok(Self {
            disallowed,
            replacements,
        })
    }

    /// The replacement for `name`, if `name` is disallowed.
    pub fn replacement_for(&self, name: &str) -> Option<&str> {
        self.disallowed
            .iter()
            .position(|d| d == name)
            .map(|i| self.replacements[i].as_str())
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;

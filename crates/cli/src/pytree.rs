// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Python syntax trees via tree-sitter.
//!
//! Wraps parsing and document-order traversal; the hooks never build a
//! grammar themselves. Strict hooks treat a tree containing syntax errors
//! as fatal for that file; bulk hooks use [`PyTree::try_parse_file`] and
//! skip unparsable files.

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree, TreeCursor};

use crate::error::{Error, Result};

/// A parsed Python source file.
pub struct PyTree {
    tree: Tree,
    source: String,
    path: PathBuf,
}

impl PyTree {
    /// Parse `source` as Python. Fails on syntax errors.
    pub fn parse_source(source: String, path: &Path) -> Result<Self> {
        let tree = raw_parse(&source).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
        })?;
        if tree.root_node().has_error() {
            return Err(Error::Parse {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            tree,
            source,
            path: path.to_path_buf(),
        })
    }

    /// Read and parse a file. Fails on I/O and syntax errors.
    pub fn parse_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse_source(source, path)
    }

    /// Lenient variant for bulk hooks: an unreadable or unparsable file
    /// yields None instead of an error.
    pub fn try_parse_file(path: &Path) -> Option<Self> {
        let source = fs::read_to_string(path).ok()?;
        match Self::parse_source(source, path) {
            Ok(tree) => Some(tree),
            Err(_) => {
                tracing::warn!(path = %path.display(), "skipping unparsable file");
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text of a node.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// All nodes in document order (preorder).
    pub fn nodes(&self) -> Preorder<'_> {
        Preorder::new(self.root())
    }
}

/// 1-based line of a node's start.
pub fn line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// 0-based column of a node's start.
pub fn column(node: Node<'_>) -> u32 {
    node.start_position().column as u32
}

/// For an `attribute` node (`obj.attr`), the attribute name.
pub fn attribute_name<'t>(tree: &'t PyTree, node: Node<'t>) -> Option<&'t str> {
    if node.kind() != "attribute" {
        return None;
    }
    node.child_by_field_name("attribute").map(|n| tree.text(n))
}

/// For a `call` node whose callee is an attribute (`obj.method(...)`),
/// the method name.
pub fn call_method_name<'t>(tree: &'t PyTree, node: Node<'t>) -> Option<&'t str> {
    if node.kind() != "call" {
        return None;
    }
    let func = node.child_by_field_name("function")?;
    attribute_name(tree, func)
}

/// For a `call` node whose callee is a plain identifier (`Ctor(...)`),
/// the identifier.
pub fn call_identifier<'t>(tree: &'t PyTree, node: Node<'t>) -> Option<&'t str> {
    if node.kind() != "call" {
        return None;
    }
    let func = node.child_by_field_name("function")?;
    if func.kind() == "identifier" {
        Some(tree.text(func))
    } else {
        None
    }
}

/// For a `string` node, the literal content without quotes.
///
/// F-string interpolations are not resolved; only plain content fragments
/// are returned, which is all the literal-matching rules need.
pub fn string_value(tree: &PyTree, node: Node<'_>) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut cursor = node.walk();
    let content: String = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "string_content")
        .map(|c| tree.text(c))
        .collect();
    Some(content)
}

/// Preorder traversal over every node of a tree.
pub struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Preorder<'t> {
    fn new(root: Node<'t>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }
        Some(node)
    }
}

fn raw_parse(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_python::LANGUAGE.into();
    parser.set_language(&language).ok()?;
    parser.parse(source, None)
}

#[cfg(test)]
#[path = "pytree_tests.rs"]
mod tests;

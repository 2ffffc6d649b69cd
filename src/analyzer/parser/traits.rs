use std::fs;
use std::path::Path;

use crate::types::{Module, Result, ViewerError};

pub trait Parser: Send + Sync {
    /// Extract the outline of in-memory source text. `path` is recorded as
    /// the module filename verbatim.
    fn parse(&self, path: &str, content: &str) -> Result<Module>;

    /// Read a file and extract its outline.
    fn parse_file(&self, path: &Path) -> Result<Module> {
        let content = fs::read_to_string(path).map_err(|e| ViewerError::file_read(path, e))?;
        self.parse(&path.to_string_lossy(), &content)
    }
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// 1-based inclusive line span of a node.
///
/// The end is the last line holding code: trailing comments and whitespace
/// that the grammar folds into the node do not extend the span.
pub fn get_line_span(node: tree_sitter::Node, content: &[u8]) -> (u32, u32) {
    let start_line = node.start_position().row as u32 + 1;

    let last = last_code_descendant(node);
    let trailing_newlines = content
        .get(last.start_byte()..last.end_byte())
        .map(|text| {
            text.iter()
                .rev()
                .take_while(|b| b.is_ascii_whitespace())
                .filter(|b| **b == b'\n')
                .count()
        })
        .unwrap_or(0);
    let end_line = (last.end_position().row + 1).saturating_sub(trailing_newlines) as u32;
    (start_line, end_line.max(start_line))
}

/// Deepest last descendant of `node`, skipping comments at every level.
fn last_code_descendant(node: tree_sitter::Node) -> tree_sitter::Node {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let last = current
            .children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .last();
        match last {
            Some(child) => current = child,
            None => return current,
        }
    }
}

/// First ERROR or MISSING node in document order, if any.
pub fn find_first_error(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = node.walk();
    loop {
        let current = cursor.node();
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        // Only subtrees flagged with an error can contain one
        if current.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| ViewerError::Parser(format!("Failed to set {} language: {}", lang_name, e)))?;
    Ok(parser)
}

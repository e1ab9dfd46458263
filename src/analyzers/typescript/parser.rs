//! Tree-sitter parser integration for TypeScript
//!
//! Provides parsing using tree-sitter grammars for TS/TSX.

use crate::core::ast::{JsLanguageVariant, TypeScriptAst};
use crate::core::errors::{Error, Result};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

/// Get the tree-sitter language for a variant
fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse TypeScript source code into a tree-sitter AST
pub fn parse_source(
    content: &str,
    path: &Path,
    variant: JsLanguageVariant,
) -> Result<TypeScriptAst> {
    let mut parser = Parser::new();
    let language = get_language(variant);

    parser
        .set_language(&language)
        .map_err(|e| Error::parse(path, format!("Failed to set tree-sitter language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, "Failed to parse source code"))?;

    Ok(TypeScriptAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
        language_variant: variant,
    })
}

/// Determine language variant from file path
pub fn detect_variant(path: &Path) -> JsLanguageVariant {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(JsLanguageVariant::from_extension)
        .unwrap_or(JsLanguageVariant::TypeScript)
}

/// Annotation wrappers around a type position
pub const ANNOTATION_KINDS: &[&str] = &[
    "type_annotation",
    "opting_type_annotation",
    "omitting_type_annotation",
    "adding_type_annotation",
];

/// Check if a parse tree has errors the extractor cannot recover from.
///
/// The grammar has no rule for type arguments after an import type
/// (`import("m").T<U>`) and reports an error inside the annotation. Such
/// errors are left to the type serializer; every other error or missing node
/// fails the module.
pub fn has_parse_errors(tree: &Tree, source: &str) -> bool {
    contains_fatal_error(&tree.root_node(), source)
}

fn contains_fatal_error(node: &Node, source: &str) -> bool {
    if !node.has_error() {
        return false;
    }
    if ANNOTATION_KINDS.contains(&node.kind()) && mentions_import_type(node_text(node, source)) {
        return false;
    }
    if node.is_error() || node.is_missing() {
        return true;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .iter()
        .any(|child| contains_fatal_error(child, source))
}

/// Byte offsets of every `import(` that starts an import type
pub fn import_type_starts(text: &str) -> Vec<usize> {
    text.match_indices("import")
        .filter(|(start, _)| {
            !text[..*start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
        })
        .filter(|(start, keyword)| text[start + keyword.len()..].trim_start().starts_with('('))
        .map(|(start, _)| start)
        .collect()
}

fn mentions_import_type(text: &str) -> bool {
    !import_type_starts(text).is_empty()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    &source[start..end]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Named children of a node, without comments
pub fn named_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Check for an anonymous keyword or punctuation child such as `async` or `?`
pub fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Collapse whitespace runs to single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

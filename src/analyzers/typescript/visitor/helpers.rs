//! Helper functions for TypeScript export discovery
//!
//! Node classification and leading comment collection.

use crate::analyzers::typescript::parser::{has_token, named_children, node_text};
use tree_sitter::Node;

/// Statement kinds that declare a named function
const FUNCTION_DECLARATION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
];

/// Expression kinds that evaluate to a function
const FUNCTION_VALUE_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

pub fn is_function_declaration(node: &Node) -> bool {
    FUNCTION_DECLARATION_KINDS.contains(&node.kind())
}

pub fn is_function_value(node: &Node) -> bool {
    FUNCTION_VALUE_KINDS.contains(&node.kind())
}

pub fn is_variable_declaration(node: &Node) -> bool {
    matches!(node.kind(), "lexical_declaration" | "variable_declaration")
}

pub fn has_async_modifier(node: &Node) -> bool {
    has_token(node, "async")
}

/// Strip wrappers that do not change the runtime value:
/// `(fn)`, `fn as T`, `fn satisfies T`, `fn!`
pub fn unwrap_value<'tree>(node: Node<'tree>) -> Node<'tree> {
    match node.kind() {
        "parenthesized_expression"
        | "as_expression"
        | "satisfies_expression"
        | "non_null_expression" => match named_children(&node).first() {
            Some(inner) => unwrap_value(*inner),
            None => node,
        },
        _ => node,
    }
}

/// `export declare function f(): T;` wraps the signature in an ambient declaration
pub fn unwrap_declaration<'tree>(node: Node<'tree>) -> Node<'tree> {
    if node.kind() == "ambient_declaration" {
        if let Some(inner) = named_children(&node).first() {
            return *inner;
        }
    }
    node
}

/// Variable declarators whose initializer is a function, paired with that function
pub fn function_declarators<'tree>(declaration: &Node<'tree>) -> Vec<(Node<'tree>, Node<'tree>)> {
    named_children(declaration)
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .filter_map(|declarator| {
            let name = declarator.child_by_field_name("name")?;
            if name.kind() != "identifier" {
                return None;
            }
            let value = unwrap_value(declarator.child_by_field_name("value")?);
            is_function_value(&value).then_some((name, value))
        })
        .collect()
}

/// Comment block directly above `statement`.
///
/// Consecutive comments are collected while each one ends on the line right
/// above the next. A blank line, a non-comment sibling or a trailing comment
/// that shares its line with code ends the run.
pub fn leading_doc(statement: &Node, source: &str) -> Option<String> {
    let mut comments = Vec::new();
    let mut next_row = statement.start_position().row;
    let mut current = statement.prev_sibling();

    while let Some(candidate) = current {
        if candidate.kind() != "comment" {
            break;
        }
        let end_row = candidate.end_position().row;
        if end_row != next_row && end_row + 1 != next_row {
            break;
        }
        if is_trailing_comment(&candidate) {
            break;
        }
        comments.push(node_text(&candidate, source));
        next_row = candidate.start_position().row;
        current = candidate.prev_sibling();
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    Some(comments.join("\n"))
}

/// `foo(); // note`: the comment belongs to the code on its left
fn is_trailing_comment(comment: &Node) -> bool {
    comment.prev_sibling().is_some_and(|previous| {
        previous.kind() != "comment"
            && previous.end_position().row == comment.start_position().row
    })
}

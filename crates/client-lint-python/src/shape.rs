//! Structural classification of `return` values.

use client_lint_core::ReturnShape;
use tree_sitter::Node;

/// Node kinds that build a sequence.
const COLLECTION_KINDS: &[&str] = &[
    "list",
    "tuple",
    "set",
    "expression_list",
    "list_comprehension",
    "set_comprehension",
    "generator_expression",
];

/// Node kinds that build a single value.
const SCALAR_KINDS: &[&str] = &[
    "string",
    "concatenated_string",
    "integer",
    "float",
    "true",
    "false",
    "dictionary",
    "dictionary_comprehension",
];

/// Shape of a `return_statement` node.
#[must_use]
pub fn of_return(node: &Node<'_>) -> ReturnShape {
    let mut cursor = node.walk();
    let value = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    value.map_or(ReturnShape::Bare, |v| of_expression(&v))
}

/// Shape of an expression node.
#[must_use]
pub fn of_expression(node: &Node<'_>) -> ReturnShape {
    match node.kind() {
        "none" => ReturnShape::None,
        "parenthesized_expression" => {
            let mut cursor = node.walk();
            let inner = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
            inner.map_or(ReturnShape::Opaque, |i| of_expression(&i))
        }
        kind if COLLECTION_KINDS.contains(&kind) => ReturnShape::Collection,
        kind if SCALAR_KINDS.contains(&kind) => ReturnShape::Scalar,
        _ => ReturnShape::Opaque,
    }
}

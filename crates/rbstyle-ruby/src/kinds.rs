//! Mapping from tree-sitter-ruby grammar names to [`NodeKind`].

use rbstyle_core::NodeKind;

/// Classifies a tree-sitter node.
///
/// `is_error` covers both `ERROR` nodes and zero-width `MISSING` tokens.
/// Anonymous tokens share names with named nodes (the `class` keyword inside
/// a `class` node), so only `,` is classified when `is_named` is false.
#[must_use]
pub fn node_kind(grammar_kind: &str, is_named: bool, is_error: bool) -> NodeKind {
    if is_error {
        return NodeKind::Error;
    }
    if !is_named {
        return match grammar_kind {
            "," => NodeKind::Comma,
            _ => NodeKind::Other,
        };
    }
    match grammar_kind {
        "program" => NodeKind::Program,
        "string" => NodeKind::String,
        "array" => NodeKind::Array,
        "hash" => NodeKind::Hash,
        "pair" => NodeKind::Pair,
        "element_reference" => NodeKind::ElementReference,
        "method" => NodeKind::Method,
        "singleton_method" => NodeKind::SingletonMethod,
        "method_parameters" => NodeKind::MethodParameters,
        "class" => NodeKind::Class,
        "module" => NodeKind::Module,
        "singleton_class" => NodeKind::SingletonClass,
        "superclass" => NodeKind::Superclass,
        "assignment" => NodeKind::Assignment,
        "operator_assignment" => NodeKind::OperatorAssignment,
        "constant" => NodeKind::Constant,
        "scope_resolution" => NodeKind::ScopeResolution,
        "call" => NodeKind::Call,
        "block" => NodeKind::Block,
        "do_block" => NodeKind::DoBlock,
        "simple_symbol" => NodeKind::SimpleSymbol,
        "delimited_symbol" => NodeKind::DelimitedSymbol,
        "identifier" => NodeKind::Identifier,
        "comment" => NodeKind::Comment,
        "ERROR" => NodeKind::Error,
        _ => NodeKind::Other,
    }
}

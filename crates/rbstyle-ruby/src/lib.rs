//! # rbstyle-ruby
//!
//! Tree-sitter based Ruby front end for rbstyle.
//!
//! Converts tree-sitter-ruby parse trees into the read-only
//! [`rbstyle_core::SyntaxTree`] that rules inspect. Adds:
//!
//! - [`RubyParser`], the [`rbstyle_core::SourceParser`] for Ruby files
//! - [`node_kind`] for grammar-name to [`rbstyle_core::NodeKind`] mapping

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod kinds;
pub mod parser;

pub use kinds::node_kind;
pub use parser::RubyParser;

//! Parser seam between source files and the syntax tree.
//!
//! `SourceParser` is the extension point for plugging in a language
//! front end. The analyzer only relies on the read-only [`SyntaxTree`] it
//! returns.

use std::path::Path;

use crate::syntax::SyntaxTree;

/// A file the parser could not turn into a usable tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// Line of the first error (1-indexed).
    pub line: usize,
    /// Column of the first error (1-indexed).
    pub column: usize,
    /// Description of the error.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Trait for language front ends.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"ruby"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, with the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Extension-less file names this parser handles (e.g., `"Rakefile"`).
    fn file_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Parses source text into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the source is not syntactically valid.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Returns true if `path` looks like a file for this parser.
    fn handles(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if self.file_names().contains(&file_name) {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|x| x.strip_prefix('.') == Some(ext)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::syntax::tests::{small_tree, span};
    use crate::syntax::{NodeKind, NodeSpec};

    /// Parser for tests: `x = 'a'` parses to a fixed tree, text containing
    /// `@@` fails, anything else yields a bare program node.
    pub(crate) struct StubParser;

    impl SourceParser for StubParser {
        fn language_id(&self) -> &'static str {
            "stub"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".rb"]
        }

        fn file_names(&self) -> &'static [&'static str] {
            &["Rakefile"]
        }

        fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
            if let Some(pos) = source.find("@@") {
                return Err(ParseError::new(1, pos + 1, "unexpected `@@`"));
            }
            if source == "x = 'a'" {
                return Ok(small_tree());
            }
            let mut tree = SyntaxTree::new(source);
            tree.push(
                None,
                NodeSpec {
                    kind: NodeKind::Program,
                    grammar_kind: "program",
                    field: None,
                    named: true,
                    span: span(0, source.len(), 1),
                },
            );
            Ok(tree)
        }
    }

    #[test]
    fn handles_by_extension_and_name() {
        let parser = StubParser;
        assert!(parser.handles(Path::new("lib/a.rb")));
        assert!(parser.handles(Path::new("Rakefile")));
        assert!(!parser.handles(Path::new("README.md")));
        assert!(!parser.handles(Path::new("rb")));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::new(3, 7, "unexpected end");
        assert_eq!(err.to_string(), "3:7: unexpected end");
    }
}

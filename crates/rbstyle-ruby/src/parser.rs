//! Ruby front end using Tree-sitter.

use rbstyle_core::{NodeId, NodeSpec, ParseError, SourceParser, Span, SyntaxTree};
use tracing::trace;
use tree_sitter::{Language, Node, Parser};

use crate::kinds::node_kind;

/// Parses Ruby source into an rbstyle [`SyntaxTree`].
///
/// A tree-sitter parser is not shareable between threads, so a fresh one is
/// created for every call to [`SourceParser::parse`].
pub struct RubyParser {
    language: Language,
}

impl RubyParser {
    /// Creates a new Ruby parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_ruby::LANGUAGE.into(),
        }
    }

    fn span(node: &Node<'_>) -> Span {
        let start = node.start_position();
        let end = node.end_position();
        Span {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1,
            start_column: start.column + 1,
            end_line: end.row + 1,
            end_column: end.column + 1,
        }
    }

    /// First `ERROR` or `MISSING` node in document order.
    fn first_error<'a>(root: Node<'a>) -> Option<Node<'a>> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                return Some(node);
            }
            if !node.has_error() {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        None
    }

    fn describe_error(node: &Node<'_>, src: &str) -> String {
        if node.is_missing() {
            return format!("syntax error: missing `{}`", node.kind());
        }
        let text = src.get(node.start_byte()..node.end_byte()).unwrap_or("");
        let snippet = text.lines().next().unwrap_or("").trim();
        if snippet.is_empty() {
            "syntax error".to_string()
        } else if snippet.chars().count() > 40 {
            let cut: String = snippet.chars().take(40).collect();
            format!("syntax error near `{cut}...`")
        } else {
            format!("syntax error near `{snippet}`")
        }
    }

    /// Copies every node, named and anonymous, into the arena in pre-order.
    fn convert(root: Node<'_>, source: &str) -> SyntaxTree {
        let mut tree = SyntaxTree::new(source);
        let mut cursor = root.walk();
        let mut parents: Vec<NodeId> = Vec::new();

        loop {
            let node = cursor.node();
            let spec = NodeSpec {
                kind: node_kind(
                    node.kind(),
                    node.is_named(),
                    node.is_error() || node.is_missing(),
                ),
                grammar_kind: node.kind(),
                field: cursor.field_name(),
                named: node.is_named(),
                span: Self::span(&node),
            };
            let id = tree.push(parents.last().copied(), spec);

            if cursor.goto_first_child() {
                parents.push(id);
                continue;
            }
            if cursor.goto_next_sibling() {
                continue;
            }
            loop {
                if !cursor.goto_parent() {
                    return tree;
                }
                parents.pop();
                if cursor.goto_next_sibling() {
                    break;
                }
            }
        }
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for RubyParser {
    fn language_id(&self) -> &'static str {
        "ruby"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".rb", ".rake", ".gemspec", ".ru"]
    }

    fn file_names(&self) -> &'static [&'static str] {
        &["Gemfile", "Rakefile"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(1, 1, format!("failed to load Ruby grammar: {e}")))?;

        let ts_tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(1, 1, "parser produced no tree"))?;
        let root = ts_tree.root_node();

        if root.has_error() {
            let (line, column, message) = match Self::first_error(root) {
                Some(node) => {
                    let pos = node.start_position();
                    (pos.row + 1, pos.column + 1, Self::describe_error(&node, source))
                }
                None => (1, 1, "syntax error".to_string()),
            };
            trace!("Parse failed at {}:{}: {}", line, column, message);
            return Err(ParseError::new(line, column, message));
        }

        Ok(Self::convert(root, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbstyle_core::NodeKind;
    use std::path::Path;

    fn parse(src: &str) -> SyntaxTree {
        RubyParser::new().parse(src).expect("valid ruby")
    }

    fn first_of(tree: &SyntaxTree, kind: NodeKind) -> Option<rbstyle_core::Node<'_>> {
        let root = tree.root()?;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == kind {
                return Some(node);
            }
            stack.extend(node.children().rev());
        }
        None
    }

    #[test]
    fn root_is_program() {
        let tree = parse("puts 1\n");
        let root = tree.root().unwrap();
        assert_eq!(root.kind(), NodeKind::Program);
        assert_eq!(root.span().start_line, 1);
        assert!(root.parent().is_none());
    }

    #[test]
    fn empty_source_parses() {
        let tree = parse("");
        assert_eq!(tree.root().unwrap().kind(), NodeKind::Program);
    }

    #[test]
    fn string_span_is_one_indexed() {
        let tree = parse("x = 'abc'\n");
        let string = first_of(&tree, NodeKind::String).unwrap();
        assert_eq!(string.text(), "'abc'");
        let span = string.span();
        assert_eq!((span.start_line, span.start_column), (1, 5));
        assert_eq!(span.end_column, 10);
        assert_eq!(string.field_name(), Some("right"));
    }

    #[test]
    fn anonymous_tokens_are_kept() {
        let tree = parse("[1, 2]\n");
        let array = first_of(&tree, NodeKind::Array).unwrap();
        let kinds: Vec<&str> = array.children().map(|c| c.grammar_kind()).collect();
        assert_eq!(kinds, vec!["[", "integer", ",", "integer", "]"]);
        assert_eq!(array.named_children().count(), 2);
        assert!(array.children().any(|c| c.kind() == NodeKind::Comma));
    }

    #[test]
    fn fields_are_recorded() {
        let tree = parse("class Foo < Bar\nend\n");
        let class = first_of(&tree, NodeKind::Class).unwrap();
        assert_eq!(class.child_by_field("name").unwrap().text(), "Foo");
        let superclass = class.child_by_field("superclass").unwrap();
        assert_eq!(superclass.kind(), NodeKind::Superclass);
    }

    #[test]
    fn keyword_tokens_keep_other_kind() {
        let tree = parse("module A\n  class Foo\n  end\nend\n");
        let module = first_of(&tree, NodeKind::Module).unwrap();
        assert!(module.is_named());
        let keyword = module.children().next().unwrap();
        assert_eq!(keyword.grammar_kind(), "module");
        assert_eq!(keyword.kind(), NodeKind::Other);

        let class = first_of(&tree, NodeKind::Class).unwrap();
        assert!(class.is_named());
        assert_eq!(class.text(), "class Foo\n  end");
    }

    #[test]
    fn block_forms_are_distinct() {
        let tree = parse("a.each { |x| x }\nb.each do |y|\n  y\nend\n");
        assert!(first_of(&tree, NodeKind::Block).is_some());
        let do_block = first_of(&tree, NodeKind::DoBlock).unwrap();
        assert_eq!(do_block.span().start_line, 2);
        assert_eq!(do_block.span().end_line, 4);
    }

    #[test]
    fn method_parameters_both_forms() {
        let tree = parse("def a(x)\nend\ndef b y\nend\n");
        let root = tree.root().unwrap();
        let params: Vec<&str> = root
            .children()
            .filter_map(|m| m.child_by_field("parameters"))
            .map(|p| p.text())
            .collect();
        assert_eq!(params, vec!["(x)", "y"]);
    }

    #[test]
    fn syntax_error_is_reported_with_position() {
        let err = RubyParser::new().parse("def foo\n  [1, 2\nend\n").unwrap_err();
        assert!(err.line >= 1);
        assert!(err.column >= 1);
        assert!(err.message.starts_with("syntax error"));
    }

    #[test]
    fn missing_end_is_an_error() {
        assert!(RubyParser::new().parse("class Foo\n").is_err());
    }

    #[test]
    fn handles_ruby_files() {
        let parser = RubyParser::new();
        assert!(parser.handles(Path::new("app/models/user.rb")));
        assert!(parser.handles(Path::new("lib/tasks/db.rake")));
        assert!(parser.handles(Path::new("Gemfile")));
        assert!(parser.handles(Path::new("config.ru")));
        assert!(!parser.handles(Path::new("app.py")));
    }
}

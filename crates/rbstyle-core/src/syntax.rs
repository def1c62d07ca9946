//! Read-only syntax tree consumed by the walker and rules.
//!
//! Parser adapters convert their native trees into a [`SyntaxTree`], an
//! arena of nodes with parent links. Rules never see the parser's own types;
//! they inspect nodes through the borrowed [`Node`] handle, which mirrors the
//! tree-sitter node API (kind, fields, children, span).

use serde::{Deserialize, Serialize};

/// Node kinds that rules can subscribe to.
///
/// Anything a rule does not dispatch on maps to [`NodeKind::Other`]; the
/// original grammar name stays available through [`Node::grammar_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a source file.
    Program,
    /// String literal (`'a'`, `"a"`, `%q(a)`).
    String,
    /// Array literal (`[1, 2]`).
    Array,
    /// Hash literal (`{ a: 1 }`).
    Hash,
    /// Key/value pair inside a hash.
    Pair,
    /// Index access (`recv[arg]`).
    ElementReference,
    /// Instance method definition (`def foo`).
    Method,
    /// Singleton method definition (`def self.foo`).
    SingletonMethod,
    /// Parameter list of a method definition.
    MethodParameters,
    /// Class definition.
    Class,
    /// Module definition.
    Module,
    /// `class << self` block.
    SingletonClass,
    /// `< Base` clause of a class definition.
    Superclass,
    /// Plain assignment (`a = b`).
    Assignment,
    /// Compound assignment (`a ||= b`, `a += b`).
    OperatorAssignment,
    /// Constant reference (`Foo`).
    Constant,
    /// Scoped constant (`Foo::Bar`).
    ScopeResolution,
    /// Method call with a receiver or arguments.
    Call,
    /// Brace block (`{ |x| x }`).
    Block,
    /// Keyword block (`do |x| ... end`).
    DoBlock,
    /// Plain symbol (`:foo`).
    SimpleSymbol,
    /// Quoted symbol (`:"foo"`).
    DelimitedSymbol,
    /// Bare identifier.
    Identifier,
    /// Comment.
    Comment,
    /// `,` token.
    Comma,
    /// Syntax error or missing token inserted by error recovery.
    Error,
    /// Any other node.
    Other,
}

/// Position range of a node in source text.
///
/// Lines and columns are 1-indexed; columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start_byte: usize,
    /// Byte offset one past the last byte.
    pub end_byte: usize,
    /// Line of the first byte.
    pub start_line: usize,
    /// Column of the first byte.
    pub start_column: usize,
    /// Line of the last byte.
    pub end_line: usize,
    /// Column one past the last byte.
    pub end_column: usize,
}

impl Span {
    /// Returns true if the span starts and ends on the same line.
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Returns true for zero-width spans (e.g. missing tokens).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Data supplied by a parser adapter for each node it pushes.
#[derive(Debug, Clone, Copy)]
pub struct NodeSpec {
    /// Dispatch kind.
    pub kind: NodeKind,
    /// Raw grammar name (e.g. `"element_reference"`, `","`).
    pub grammar_kind: &'static str,
    /// Field name under which the node hangs off its parent.
    pub field: Option<&'static str>,
    /// Named node (as opposed to an anonymous token).
    pub named: bool,
    /// Source position.
    pub span: Span,
}

#[derive(Debug, Clone)]
struct NodeData {
    spec: NodeSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An owned syntax tree for one source file.
///
/// Built once by a parser adapter and then only read.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Creates an empty tree over `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    /// Appends a node as the last child of `parent`, or as the root when
    /// `parent` is `None`.
    ///
    /// Only the first parentless node becomes the root.
    pub fn push(&mut self, parent: Option<NodeId>, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            spec,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    /// Returns the root node, if any node has been pushed.
    #[must_use]
    pub fn root(&self) -> Option<Node<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.node(NodeId(0)))
        }
    }

    /// Returns a handle for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.0 < self.nodes.len(), "node id out of range");
        Node { tree: self, id }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Borrowed handle to a node in a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    /// Node id within its tree.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Dispatch kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().spec.kind
    }

    /// Raw grammar kind.
    #[must_use]
    pub fn grammar_kind(&self) -> &'static str {
        self.data().spec.grammar_kind
    }

    /// Field name under the parent, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&'static str> {
        self.data().spec.field
    }

    /// Whether this is a named node.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.data().spec.named
    }

    /// Source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.data().spec.span
    }

    /// Source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        let span = self.span();
        self.tree
            .source
            .get(span.start_byte..span.end_byte)
            .unwrap_or("")
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    /// All children, named and anonymous, in source order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |id| tree.node(*id))
    }

    /// Named children in source order.
    pub fn named_children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        self.children().filter(Node::is_named)
    }

    /// First child hanging off `field`.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<Node<'t>> {
        self.children().find(|c| c.field_name() == Some(field))
    }

    /// Enclosing nodes from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'t>> + 't {
        std::iter::successors(self.parent(), Node::parent)
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = self.span();
        write!(
            f,
            "{}@{}:{}",
            self.grammar_kind(),
            span.start_line,
            span.start_column
        )
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

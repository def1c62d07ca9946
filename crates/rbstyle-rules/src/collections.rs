//! Rule to enforce one-element-per-line layout for array and hash literals.
//!
//! # Rationale
//!
//! With one element per line and a trailing comma, adding or removing an
//! element touches exactly one line of the diff.
//!
//! # Configuration
//!
//! - `min_elements`: Literals with fewer elements are ignored (default: 2)
//! - `trailing_comma`: Require a trailing comma on multi-line literals (default: true)
//!
//! # Suppression
//!
//! - `# rbstyle: allow(collections)` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for collections.
pub const CODE: &str = "RB003";

/// Rule name for collections.
pub const NAME: &str = "collections";

/// Requires multi-element collection literals to place each element on its
/// own line, followed by a trailing comma.
#[derive(Debug, Clone)]
pub struct CollectionLayout {
    /// Minimum element count for the rule to apply.
    pub min_elements: usize,
    /// Require a trailing comma after the last element.
    pub trailing_comma: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CollectionLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionLayout {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_elements: 2,
            trailing_comma: true,
            severity: Severity::Warning,
        }
    }

    /// Sets the minimum element count.
    #[must_use]
    pub fn min_elements(mut self, min: usize) -> Self {
        self.min_elements = min;
        self
    }

    /// Sets whether a trailing comma is required.
    #[must_use]
    pub fn trailing_comma(mut self, required: bool) -> Self {
        self.trailing_comma = required;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// First layout problem of the literal, if any.
    fn problem(
        &self,
        open: Node<'_>,
        elements: &[Node<'_>],
        close: Node<'_>,
    ) -> Option<&'static str> {
        let (first, last) = (elements.first()?, elements.last()?);

        if elements
            .windows(2)
            .any(|pair| pair[0].span().end_line == pair[1].span().start_line)
        {
            return Some("Elements share a line; put each element on its own line");
        }
        if first.span().start_line == open.span().end_line {
            return Some("First element is on the same line as the opening bracket");
        }
        if close.span().start_line == last.span().end_line {
            return Some("Closing bracket is on the same line as the last element");
        }
        if self.trailing_comma && !has_trailing_comma(*last, close) {
            return Some("Multi-line literal is missing a trailing comma");
        }
        None
    }
}

/// True if a `,` follows `last` before `close`.
fn has_trailing_comma(last: Node<'_>, close: Node<'_>) -> bool {
    let Some(parent) = last.parent() else {
        return false;
    };
    parent
        .children()
        .skip_while(|c| *c != last)
        .skip(1)
        .take_while(|c| *c != close)
        .any(|c| c.kind() == NodeKind::Comma)
}

impl Rule for CollectionLayout {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Puts each element of a multi-element literal on its own line with a trailing comma"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Array, NodeKind::Hash]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let (Some(open), Some(close)) = (node.children().next(), node.children().next_back()) else {
            return Err(RuleError::unexpected_shape(node, "bracketed literal"));
        };
        if open.is_named() || close.is_named() {
            return Err(RuleError::unexpected_shape(node, "bracketed literal"));
        }

        let elements: Vec<Node<'_>> = node
            .named_children()
            .filter(|c| c.kind() != NodeKind::Comment)
            .collect();
        if elements.len() < self.min_elements.max(1) {
            return Ok(Vec::new());
        }

        let Some(message) = self.problem(open, &elements, close) else {
            return Ok(Vec::new());
        };

        let kind = if node.kind() == NodeKind::Hash { "hash" } else { "array" };
        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(node),
            message,
        )
        .with_suggestion(Suggestion::new(format!(
            "Write one {kind} element per line and end the last one with a comma"
        )))])
    }
}

//! Rule to match block delimiters to block length.
//!
//! # Rationale
//!
//! Braces read as an expression and suit one-line blocks; `do ... end`
//! reads as a statement and suits blocks spanning several lines.
//!
//! # Suppression
//!
//! - `# rbstyle: allow(blocks)` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for blocks.
pub const CODE: &str = "RB002";

/// Rule name for blocks.
pub const NAME: &str = "blocks";

/// Requires `{ }` for single-line blocks and `do ... end` for multi-line ones.
#[derive(Debug, Clone)]
pub struct BlockDelimiters {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for BlockDelimiters {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDelimiters {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for BlockDelimiters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Uses braces for single-line blocks and do...end for multi-line blocks"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Block, NodeKind::DoBlock]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let single_line = node.span().is_single_line();

        let (message, help) = match node.kind() {
            NodeKind::Block if !single_line => (
                "Multi-line block uses braces",
                "Use do...end for blocks spanning several lines",
            ),
            NodeKind::DoBlock if single_line => (
                "Single-line block uses do...end",
                "Use { ... } for blocks that fit on one line",
            ),
            NodeKind::Block | NodeKind::DoBlock => return Ok(Vec::new()),
            _ => return Err(RuleError::unexpected_shape(node, "block or do_block")),
        };

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(node),
            message,
        )
        .with_suggestion(Suggestion::new(help))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, lint};

    #[test]
    fn single_line_braces_pass() {
        assert!(lint(BlockDelimiters::new(), "items.map { |i| i * 2 }\n").is_empty());
    }

    #[test]
    fn multi_line_do_passes() {
        let src = "items.each do |i|\n  puts i\nend\n";
        assert!(lint(BlockDelimiters::new(), src).is_empty());
    }

    #[test]
    fn multi_line_braces_fire() {
        let src = "items.each { |i|\n  puts i\n}\n";
        let violations = lint(BlockDelimiters::new(), src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Multi-line block uses braces");
        assert_eq!((violations[0].location.line, violations[0].location.column), (1, 12));
    }

    #[test]
    fn single_line_do_fires() {
        let violations = lint(BlockDelimiters::new(), "3.times do |i| puts i end\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Single-line block uses do...end");
    }

    #[test]
    fn nested_blocks_checked_independently() {
        let src = "groups.each do |g|\n  g.map do |x| x end\n  g.select { |x|\n    x\n  }\nend\n";
        assert_eq!(lines(&lint(BlockDelimiters::new(), src)), vec![2, 3]);
    }

    #[test]
    fn same_node_twice_is_deterministic() {
        let src = "a.each { |i|\n  i\n}\n";
        assert_eq!(
            lint(BlockDelimiters::new(), src),
            lint(BlockDelimiters::new(), src)
        );
    }

    #[test]
    fn severity_is_configurable() {
        let violations = lint(
            BlockDelimiters::new().severity(Severity::Info),
            "x.tap do |y| y end\n",
        );
        assert_eq!(violations[0].severity, Severity::Info);
    }
}

//! Rule trait for defining style checks.

use crate::context::FileContext;
use crate::syntax::{Node, NodeKind};
use crate::types::{Severity, Violation};

/// Error signalled by a rule that could not evaluate a node.
///
/// This is a tooling fault, not a style finding: the walker stops the
/// file and reports it separately from violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleError {
    /// What went wrong.
    pub message: String,
}

impl RuleError {
    /// Creates a new rule error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a node whose shape does not match the grammar the rule
    /// was written against.
    #[must_use]
    pub fn unexpected_shape(node: Node<'_>, expected: &str) -> Self {
        let span = node.span();
        Self::new(format!(
            "unexpected {} node at {}:{}, expected {expected}",
            node.grammar_kind(),
            span.start_line,
            span.start_column
        ))
    }
}

/// A single style check over syntax nodes.
///
/// The walker calls [`Rule::check`] once for every node whose kind is listed
/// in [`Rule::node_kinds`]. Implementations must be pure: no mutation of the
/// node or of shared state, and the same node always yields the same output.
///
/// # Example
///
/// ```ignore
/// use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Violation};
///
/// pub struct NoGlobals;
///
/// impl Rule for NoGlobals {
///     fn name(&self) -> &'static str { "no-globals" }
///     fn code(&self) -> &'static str { "RB100" }
///     fn node_kinds(&self) -> &'static [NodeKind] { &[NodeKind::Other] }
///
///     fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
///         if node.grammar_kind() != "global_variable" {
///             return Ok(Vec::new());
///         }
///         Ok(vec![Violation::new(
///             self.code(),
///             self.name(),
///             self.default_severity(),
///             ctx.location_of(node),
///             "Avoid global variables",
///         )])
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "hashes").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RB004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Node kinds this rule inspects.
    fn node_kinds(&self) -> &'static [NodeKind];

    /// Checks a single node and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when the node cannot be evaluated.
    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

//! Rule for constant naming.
//!
//! # Rationale
//!
//! Constants holding values are written in `SCREAMING_SNAKE_CASE` so they
//! stand apart from classes and modules. Constants bound to a class built
//! at runtime (`Point = Struct.new(:x, :y)`) are classes and keep CamelCase.
//!
//! # Suppression
//!
//! - `# rbstyle: allow(constants)` comment

use rbstyle_core::utils::{is_screaming_snake_case, to_screaming_snake_case};
use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for constants.
pub const CODE: &str = "RB007";

/// Rule name for constants.
pub const NAME: &str = "constants";

/// Receiver/method pairs that build a class or module.
const CLASS_BUILDERS: &[(&str, &str)] = &[
    ("Class", "new"),
    ("Struct", "new"),
    ("Module", "new"),
    ("Data", "define"),
];

/// Requires `SCREAMING_SNAKE_CASE` names for value constants.
#[derive(Debug, Clone)]
pub struct ConstantNaming {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ConstantNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantNaming {
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

/// The constant being assigned, for `FOO = ...` and `Mod::FOO = ...`.
fn assigned_constant(left: Node<'_>) -> Option<Node<'_>> {
    match left.kind() {
        NodeKind::Constant => Some(left),
        NodeKind::ScopeResolution => left
            .child_by_field("name")
            .filter(|n| n.kind() == NodeKind::Constant),
        _ => None,
    }
}

fn builds_class(value: Node<'_>) -> bool {
    if value.kind() != NodeKind::Call {
        return false;
    }
    let (Some(receiver), Some(method)) = (
        value.child_by_field("receiver"),
        value.child_by_field("method"),
    ) else {
        return false;
    };
    let receiver = receiver.text().trim_start_matches("::");
    CLASS_BUILDERS
        .iter()
        .any(|(r, m)| *r == receiver && *m == method.text())
}

impl Rule for ConstantNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Names value constants in SCREAMING_SNAKE_CASE"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Assignment, NodeKind::OperatorAssignment]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        // `FOO = v` and `FOO ||= v` share the left/right fields.
        let (Some(left), Some(right)) = (
            node.child_by_field("left"),
            node.child_by_field("right"),
        ) else {
            return Err(RuleError::unexpected_shape(node, "assignment with both sides"));
        };
        let Some(constant) = assigned_constant(left) else {
            return Ok(Vec::new());
        };

        let name = constant.text();
        if is_screaming_snake_case(name) || builds_class(right) {
            return Ok(Vec::new());
        }

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(constant),
            format!("Constant '{name}' is not SCREAMING_SNAKE_CASE"),
        )
        .with_suggestion(Suggestion::new(format!(
            "Rename to {}",
            to_screaming_snake_case(name)
        )))])
    }
}

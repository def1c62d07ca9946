//! Rule for superclass expressions.
//!
//! # Rationale
//!
//! `class Point < Struct.new(:x, :y)` creates an anonymous intermediate class
//! and breaks on reload. Subclassing core value classes (`Array`, `Hash`,
//! `String`) leaks their whole API and returns base instances from most
//! methods; composition is clearer.
//!
//! # Configuration
//!
//! - `forbidden`: Superclass names to reject (default: `["Array", "Hash", "String"]`)
//!
//! # Suppression
//!
//! - `# rbstyle: allow(inheritance)` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for inheritance.
pub const CODE: &str = "RB008";

/// Rule name for inheritance.
pub const NAME: &str = "inheritance";

/// Core classes that should not be subclassed by default.
pub const CORE_VALUE_CLASSES: &[&str] = &["Array", "Hash", "String"];

/// Forbids computed superclasses and subclassing of core value classes.
#[derive(Debug, Clone)]
pub struct SuperclassStyle {
    /// Superclass names to reject.
    pub forbidden: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SuperclassStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl SuperclassStyle {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forbidden: CORE_VALUE_CLASSES.iter().map(|s| (*s).to_string()).collect(),
            severity: Severity::Warning,
        }
    }

    /// Replaces the list of forbidden superclasses.
    #[must_use]
    pub fn forbidden<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for SuperclassStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids computed superclasses and subclassing core value classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Class]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let Some(clause) = node.child_by_field("superclass") else {
            return Ok(Vec::new());
        };
        let Some(parent) = clause
            .named_children()
            .find(|c| c.kind() != NodeKind::Comment)
        else {
            return Err(RuleError::unexpected_shape(clause, "superclass expression"));
        };

        let (message, help) = match parent.kind() {
            NodeKind::Call => (
                format!("Superclass is computed by '{}'", parent.text()),
                "Assign the built class to a constant, or pass a block to Struct.new/Data.define"
                    .to_string(),
            ),
            NodeKind::Constant | NodeKind::ScopeResolution => {
                let name = parent.text().trim_start_matches("::");
                if !self.forbidden.iter().any(|f| f == name) {
                    return Ok(Vec::new());
                }
                (
                    format!("Class inherits from core class {name}"),
                    format!("Wrap a {name} instead of subclassing it"),
                )
            }
            _ => return Ok(Vec::new()),
        };

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(parent),
            message,
        )
        .with_suggestion(Suggestion::new(help))])
    }
}

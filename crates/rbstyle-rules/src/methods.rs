//! Rule to enforce parentheses style in method definitions.
//!
//! # Rationale
//!
//! `def fetch(key, default)` makes the parameter list unambiguous, while
//! `def call()` adds punctuation that carries no information.
//!
//! # Suppression
//!
//! - `# rbstyle: allow(methods)` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for methods.
pub const CODE: &str = "RB005";

/// Rule name for methods.
pub const NAME: &str = "methods";

/// Requires parentheses around parameters, and none when there are no parameters.
#[derive(Debug, Clone)]
pub struct MethodParens {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MethodParens {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodParens {
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

impl Rule for MethodParens {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Wraps method parameters in parentheses and omits empty ones"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Method, NodeKind::SingletonMethod]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let Some(params) = node.child_by_field("parameters") else {
            return Ok(Vec::new());
        };
        let method = node
            .child_by_field("name")
            .map_or("method", |n| n.text());

        let has_params = params
            .named_children()
            .any(|c| c.kind() != NodeKind::Comment);
        let parenthesized = params.text().starts_with('(');

        let (message, help) = match (has_params, parenthesized) {
            (true, false) => (
                format!("Method '{method}' declares parameters without parentheses"),
                format!("def {method}({})", params.text().trim()),
            ),
            (false, true) => (
                format!("Method '{method}' has empty parentheses"),
                format!("def {method}"),
            ),
            _ => return Ok(Vec::new()),
        };

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(params),
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
    fn parenthesized_params_pass() {
        let src = "def fetch(key, default = nil)\n  key\nend\n";
        assert!(lint(MethodParens::new(), src).is_empty());
    }

    #[test]
    fn no_params_no_parens_passes() {
        assert!(lint(MethodParens::new(), "def call\n  1\nend\n").is_empty());
    }

    #[test]
    fn bare_params_fire() {
        let violations = lint(MethodParens::new(), "def fetch key, default\n  key\nend\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Method 'fetch' declares parameters without parentheses"
        );
        assert_eq!(
            violations[0].suggestion.as_ref().unwrap().message,
            "def fetch(key, default)"
        );
    }

    #[test]
    fn empty_parens_fire() {
        let violations = lint(MethodParens::new(), "def call()\n  1\nend\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Method 'call' has empty parentheses");
    }

    #[test]
    fn singleton_methods_are_checked() {
        let src = concat!(
            "class Widget\n",
            "  def self.build attrs\n",
            "    new\n",
            "  end\n",
            "\n",
            "  def self.default()\n",
            "    new\n",
            "  end\n",
            "end\n",
        );
        assert_eq!(lines(&lint(MethodParens::new(), src)), vec![2, 6]);
    }
}

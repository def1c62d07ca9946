//! Rule for class and module declarations.
//!
//! # Rationale
//!
//! `class Foo::Bar` resolves constants differently from nested
//! `module Foo; class Bar`, and fails outright if `Foo` is not yet loaded.
//! Names must be CamelCase.
//!
//! # Suppression
//!
//! - `# rbstyle: allow(classes)` comment

use rbstyle_core::utils::{is_camel_case, to_camel_case};
use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for classes.
pub const CODE: &str = "RB006";

/// Rule name for classes.
pub const NAME: &str = "classes";

/// Forbids compact `Foo::Bar` nesting and non-CamelCase names.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ClassDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassDefinition {
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

impl Rule for ClassDefinition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Uses nested CamelCase class and module definitions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Class, NodeKind::Module]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let Some(mut name) = node.child_by_field("name") else {
            return Err(RuleError::unexpected_shape(node, "named class or module"));
        };
        // `class ::Foo` only anchors the name at the top level.
        if name.kind() == NodeKind::ScopeResolution && name.child_by_field("scope").is_none() {
            if let Some(inner) = name.child_by_field("name") {
                name = inner;
            }
        }
        let keyword = if node.kind() == NodeKind::Module {
            "module"
        } else {
            "class"
        };

        let (message, help) = match name.kind() {
            NodeKind::ScopeResolution => (
                format!("Compact {keyword} nesting '{}'", name.text()),
                format!(
                    "Nest the definition: {}",
                    nested_form(keyword, name.text())
                ),
            ),
            NodeKind::Constant if !is_camel_case(name.text()) => (
                format!("{keyword} name '{}' is not CamelCase", name.text()),
                format!("Rename to {}", to_camel_case(name.text())),
            ),
            _ => return Ok(Vec::new()),
        };

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(name),
            message,
        )
        .with_suggestion(Suggestion::new(help))])
    }
}

/// `module Foo; class Bar` for `class Foo::Bar`.
fn nested_form(keyword: &str, path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches("::")
        .split("::")
        .filter(|s| !s.is_empty())
        .collect();
    let Some((last, outer)) = segments.split_last() else {
        return path.to_string();
    };
    let mut out: Vec<String> = outer.iter().map(|s| format!("module {s}")).collect();
    out.push(format!("{keyword} {last}"));
    out.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, lint};

    #[test]
    fn nested_camel_case_passes() {
        let src = "module Billing\n  class InvoiceLine\n  end\nend\n";
        assert!(lint(ClassDefinition::new(), src).is_empty());
    }

    #[test]
    fn top_level_anchor_is_not_nesting() {
        let src = "module ::Reports\nend\nclass ::Ledger < Base\nend\n";
        let violations = lint(ClassDefinition::new(), src);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn compact_nesting_fires() {
        let violations = lint(ClassDefinition::new(), "class Billing::Invoice\nend\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Compact class nesting 'Billing::Invoice'");
        assert_eq!(
            violations[0].suggestion.as_ref().unwrap().message,
            "Nest the definition: module Billing; class Invoice"
        );
        assert_eq!(violations[0].location.column, 7);
    }

    #[test]
    fn compact_module_nesting_fires() {
        let violations = lint(ClassDefinition::new(), "module A::B::C\nend\n");
        assert_eq!(
            violations[0].suggestion.as_ref().unwrap().message,
            "Nest the definition: module A; module B; module C"
        );
    }

    #[test]
    fn non_camel_case_fires() {
        let src = "class Invoice_line\nend\nmodule HTTPTools\nend\n";
        let violations = lint(ClassDefinition::new(), src);
        assert_eq!(lines(&violations), vec![1]);
        assert_eq!(
            violations[0].suggestion.as_ref().unwrap().message,
            "Rename to InvoiceLine"
        );
    }

    #[test]
    fn singleton_class_is_ignored() {
        let src = "class Widget\n  class << self\n    def build; end\n  end\nend\n";
        assert!(lint(ClassDefinition::new(), src).is_empty());
    }
}

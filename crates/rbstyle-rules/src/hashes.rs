//! Rule to prefer `fetch` over index-style hash reads.
//!
//! # Rationale
//!
//! `hash[:key]` silently returns `nil` for a missing key, pushing the
//! failure far from its cause. `hash.fetch(:key)` raises immediately, and
//! `fetch(:key, default)` makes the fallback explicit.
//!
//! # Configuration
//!
//! - `allow_in_tests`: Allow index reads in spec and test files (default: false)
//!
//! # Suppression
//!
//! - `# rbstyle: allow(hashes) reason="..."` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for hashes.
pub const CODE: &str = "RB004";

/// Rule name for hashes.
pub const NAME: &str = "hashes";

/// Flags `hash[:key]` and `hash["key"]` reads.
#[derive(Debug, Clone)]
pub struct PreferFetch {
    /// Allow in test code.
    pub allow_in_tests: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PreferFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferFetch {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_in_tests: false,
            severity: Severity::Warning,
        }
    }

    /// Sets whether to allow in test code.
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Grammar nodes that only occur on the left of a multiple assignment.
const TARGET_LISTS: &[&str] = &[
    "left_assignment_list",
    "rest_assignment",
    "destructured_left_assignment",
];

/// True if `node` is the target of an assignment: `h[:k] = v`, `h[:k] ||= v`,
/// `h[:a], h[:b] = 1, 2` or `*h[:k] = list`.
fn is_write_target(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if TARGET_LISTS.contains(&parent.grammar_kind()) {
        return true;
    }
    node.field_name() == Some("left")
        && matches!(
            parent.kind(),
            NodeKind::Assignment | NodeKind::OperatorAssignment
        )
}

impl Rule for PreferFetch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers Hash#fetch over [] when reading a symbol or string key"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::ElementReference]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        if self.allow_in_tests && ctx.is_test {
            return Ok(Vec::new());
        }
        if is_write_target(node) {
            return Ok(Vec::new());
        }

        let Some(receiver) = node.child_by_field("object") else {
            return Err(RuleError::unexpected_shape(node, "element reference with receiver"));
        };

        let mut args = node
            .named_children()
            .filter(|c| *c != receiver && c.kind() != NodeKind::Comment);
        let (Some(key), None) = (args.next(), args.next()) else {
            return Ok(Vec::new());
        };

        if !matches!(
            key.kind(),
            NodeKind::SimpleSymbol | NodeKind::DelimitedSymbol | NodeKind::String
        ) {
            return Ok(Vec::new());
        }

        Ok(vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location_of(node),
            format!("Use fetch instead of [] to read key {}", key.text()),
        )
        .with_suggestion(Suggestion::new(format!(
            "{}.fetch({})",
            receiver.text(),
            key.text()
        )))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, lint, lint_at};

    #[test]
    fn symbol_read_fires_once_at_access() {
        let violations = lint(PreferFetch::new(), "value = h[:key]\n");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule, NAME);
        assert_eq!((v.location.line, v.location.column), (1, 9));
        assert_eq!(v.location.length, "h[:key]".len());
        assert_eq!(v.suggestion.as_ref().unwrap().message, "h.fetch(:key)");
    }

    #[test]
    fn string_key_fires() {
        let violations = lint(PreferFetch::new(), "name = params[\"name\"]\n");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn writes_are_exempt() {
        let src = "h[:key] = 1\nh[:count] ||= 0\nh[:count] += 1\n";
        assert!(lint(PreferFetch::new(), src).is_empty());
    }

    #[test]
    fn multiple_assignment_targets_are_exempt() {
        let src = "h[:a], h[:b] = 1, 2\nfirst, *h[:rest] = list\n(h[:x], h[:y]), z = pair, 3\n";
        assert!(lint(PreferFetch::new(), src).is_empty());
    }

    #[test]
    fn read_on_right_of_multiple_assignment_fires() {
        let violations = lint(PreferFetch::new(), "a, b = h[:a], h[:b]\n");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn non_literal_and_multiple_keys_pass() {
        let src = "a = list[0]\nb = h[key]\nc = grid[1, 2]\nd = str[1..]\n";
        assert!(lint(PreferFetch::new(), src).is_empty());
    }

    #[test]
    fn chained_reads_fire_per_access() {
        let violations = lint(PreferFetch::new(), "x = config[:db][:host]\n");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn read_inside_write_value_fires() {
        let violations = lint(PreferFetch::new(), "h[:a] = other[:b]\n");
        assert_eq!(lines(&violations), vec![1]);
        assert!(violations[0].message.contains(":b"));
    }

    #[test]
    fn allow_in_tests_skips_spec_files() {
        let src = "expect(body[:id]).to eq(1)\n";
        let rule = PreferFetch::new().allow_in_tests(true);
        assert!(lint_at(rule.clone(), "spec/models/user_spec.rb", src).is_empty());
        assert_eq!(lint_at(rule, "app/models/user.rb", src).len(), 1);
    }

    #[test]
    fn error_severity_requires_reason() {
        let rule = PreferFetch::new().severity(Severity::Error);
        let src = "# rbstyle: allow(hashes)\nx = h[:legacy]\n";
        let violations = lint(rule, src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));

        let rule = PreferFetch::new().severity(Severity::Error);
        let src = "x = h[:legacy] # rbstyle: allow(RB004) reason=\"payload from API\"\n";
        assert!(lint(rule, src).is_empty());
    }
}

//! Helpers for rule unit tests: parse real Ruby and walk it with one rule.

use std::path::Path;

use rbstyle_core::{FileContext, Rule, RuleBox, SourceParser, Violation, Walker};
use rbstyle_ruby::RubyParser;

pub(crate) fn lint<R: Rule + 'static>(rule: R, src: &str) -> Vec<Violation> {
    lint_at(rule, "app/models/widget.rb", src)
}

pub(crate) fn lint_at<R: Rule + 'static>(rule: R, path: &str, src: &str) -> Vec<Violation> {
    walk(vec![Box::new(rule)], path, src)
}

/// Runs a whole rule set over `src`, as the analyzer would.
pub(crate) fn lint_all(rules: Vec<RuleBox>, src: &str) -> Vec<Violation> {
    walk(rules, "app/models/widget.rb", src)
}

fn walk(rules: Vec<RuleBox>, path: &str, src: &str) -> Vec<Violation> {
    let tree = RubyParser::new().parse(src).expect("valid ruby");
    let ctx = FileContext::new(Path::new(path), src);
    Walker::new(rules)
        .walk(&tree, &ctx)
        .unwrap_or_else(|e| panic!("walk failed: {e}"))
}

/// Rule names of the violations, in report order.
pub(crate) fn rule_names(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.rule.as_str()).collect()
}

/// Line numbers of the violations, in report order.
pub(crate) fn lines(violations: &[Violation]) -> Vec<usize> {
    violations.iter().map(|v| v.location.line).collect()
}

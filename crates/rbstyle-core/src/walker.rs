//! Single-pass tree traversal that dispatches nodes to rules.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, trace};

use crate::context::FileContext;
use crate::rule::{Rule, RuleBox, RuleError};
use crate::syntax::{Node, NodeKind, SyntaxTree};
use crate::types::{Severity, Suggestion, Violation};
use crate::utils::allowance::AllowIndex;

/// A rule failed while the walker was running it.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The rule returned an error.
    #[error("rule '{rule}' failed: {source}")]
    Rule {
        /// Name of the failing rule.
        rule: &'static str,
        /// The error it returned.
        #[source]
        source: RuleError,
    },

    /// The rule panicked.
    #[error("rule '{rule}' panicked: {message}")]
    Panic {
        /// Name of the failing rule.
        rule: &'static str,
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl WalkError {
    /// Name of the rule that failed.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Rule { rule, .. } | Self::Panic { rule, .. } => rule,
        }
    }
}

/// Applies a fixed set of rules to syntax trees.
///
/// The rule set is fixed at construction; a walker can be shared across
/// threads and reused for any number of files.
pub struct Walker {
    rules: Vec<RuleBox>,
    dispatch: HashMap<NodeKind, Vec<usize>>,
    by_name: HashMap<&'static str, usize>,
}

impl Walker {
    /// Creates a walker over `rules`, in registry order.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        let mut dispatch: HashMap<NodeKind, Vec<usize>> = HashMap::new();
        let mut by_name = HashMap::new();
        for (i, rule) in rules.iter().enumerate() {
            for kind in rule.node_kinds() {
                let slot = dispatch.entry(*kind).or_default();
                if !slot.contains(&i) {
                    slot.push(i);
                }
            }
            by_name.insert(rule.name(), i);
        }
        Self {
            rules,
            dispatch,
            by_name,
        }
    }

    /// The registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Walks `tree` once in pre-order and returns the violations sorted by
    /// location. Violations on the same position keep traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError`] on the first rule that fails or panics; the
    /// violations collected so far are discarded.
    pub fn walk(
        &self,
        tree: &SyntaxTree,
        ctx: &FileContext<'_>,
    ) -> Result<Vec<Violation>, WalkError> {
        let Some(root) = tree.root() else {
            return Ok(Vec::new());
        };

        let mut violations = Vec::new();
        let mut comments = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if node.kind() == NodeKind::Comment {
                comments.push((node.span().start_line, node.text()));
            }
            if let Some(indices) = self.dispatch.get(&node.kind()) {
                for &i in indices {
                    let rule = self.rules[i].as_ref();
                    violations.extend(run_rule(rule, node, ctx)?);
                }
            }
            stack.extend(node.children().rev());
        }

        let index = AllowIndex::from_comments(comments);
        let mut violations = self.apply_allowances(violations, &index);
        violations.sort_by_key(|v| (v.location.line, v.location.column));
        Ok(violations)
    }

    /// Removes violations covered by `# rbstyle: allow(...)` directives.
    ///
    /// A directive without a reason on a rule that requires one turns the
    /// violation into a warning about the missing reason.
    fn apply_allowances(&self, violations: Vec<Violation>, index: &AllowIndex) -> Vec<Violation> {
        if index.is_empty() {
            return violations;
        }

        let mut kept = Vec::with_capacity(violations.len());
        for v in violations {
            let check = index.check(v.location.line, &v.rule, &v.code);
            if !check.is_allowed() {
                kept.push(v);
                continue;
            }

            let requires_reason = self
                .by_name
                .get(v.rule.as_str())
                .is_some_and(|&i| self.rules[i].requires_allow_reason());

            if requires_reason && check.reason().is_none() {
                let message =
                    format!("Allow directive for '{}' is missing required reason", v.rule);
                kept.push(
                    Violation::new(v.code, v.rule, Severity::Warning, v.location, message)
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this exception is necessary",
                        )),
                );
            } else {
                debug!(
                    "Suppressed {} at {}:{}",
                    v.rule,
                    v.location.file.display(),
                    v.location.line
                );
            }
        }
        kept
    }
}

fn run_rule(
    rule: &dyn Rule,
    node: Node<'_>,
    ctx: &FileContext<'_>,
) -> Result<Vec<Violation>, WalkError> {
    trace!("{} <- {:?}", rule.name(), node);
    match catch_unwind(AssertUnwindSafe(|| rule.check(node, ctx))) {
        Ok(Ok(violations)) => Ok(violations),
        Ok(Err(source)) => Err(WalkError::Rule {
            rule: rule.name(),
            source,
        }),
        Err(payload) => Err(WalkError::Panic {
            rule: rule.name(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

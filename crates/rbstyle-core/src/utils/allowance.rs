//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! # rbstyle: allow(hashes) reason="payload comes from a JSON API"
//! value = payload[:id] # rbstyle: allow(hashes, strings)
//! ```
//!
//! A directive covers its own line and the line below it. Only real comments
//! count: the index is built from the comment nodes of the parsed tree, so a
//! directive inside a string or heredoc has no effect.

use std::collections::{BTreeMap, HashSet};

/// Directive marker inside a comment.
const MARKER: &str = "rbstyle:";

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule names or codes that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_name: &str, rule_code: &str) -> bool {
        self.rules.contains(rule_name)
            || self.rules.contains(rule_code)
            || self.rules.contains("all")
    }
}

/// All directives of one file, indexed by 1-indexed line.
#[derive(Debug, Clone, Default)]
pub struct AllowIndex {
    directives: BTreeMap<usize, AllowDirective>,
}

impl AllowIndex {
    /// Builds the index from `(start_line, text)` pairs of comment nodes.
    ///
    /// A block comment (`=begin` ... `=end`) is scanned line by line.
    #[must_use]
    pub fn from_comments<'a, I>(comments: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let directives = comments
            .into_iter()
            .flat_map(|(start, text)| {
                text.lines().enumerate().filter_map(move |(i, line)| {
                    parse_allow_directive(line).map(|d| (start + i, d))
                })
            })
            .collect();
        Self { directives }
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Checks whether a rule is allowed at `line`.
    ///
    /// Looks at the line itself first, then the line above.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str, rule_code: &str) -> AllowCheck {
        for check_line in [line, line.saturating_sub(1)] {
            if check_line == 0 {
                continue;
            }
            if let Some(directive) = self.directives.get(&check_line) {
                if directive.covers(rule_name, rule_code) {
                    return AllowCheck::Allowed {
                        reason: directive.reason.clone(),
                    };
                }
            }
        }
        AllowCheck::Denied
    }
}

/// Parses an allowance directive from a source line.
///
/// The directive may be a whole-line comment or trail code on the same line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    line.match_indices('#')
        .find_map(|(hash, _)| parse_comment(&line[hash + 1..]))
}

fn parse_comment(comment: &str) -> Option<AllowDirective> {
    let directive = comment.trim().strip_prefix(MARKER)?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let reason_part = reason_part.trim();
        let quoted = reason_part.strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}

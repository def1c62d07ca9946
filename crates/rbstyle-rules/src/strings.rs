//! Rule to enforce one quoting style for string literals.
//!
//! # Rationale
//!
//! Mixing `'single'` and `"double"` quotes for plain literals adds noise to
//! diffs and reviews. The guide prefers double quotes, falling back to
//! single quotes only when the content itself contains a double quote.
//!
//! # Configuration
//!
//! - `preferred`: `"double"` (default) or `"single"`
//!
//! # Suppression
//!
//! - `# rbstyle: allow(strings)` comment

use rbstyle_core::{FileContext, Node, NodeKind, Rule, RuleError, Severity, Suggestion, Violation};

/// Rule code for strings.
pub const CODE: &str = "RB001";

/// Rule name for strings.
pub const NAME: &str = "strings";

/// Preferred quote character for plain string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `"text"`
    #[default]
    Double,
    /// `'text'`
    Single,
}

impl QuoteStyle {
    /// Parses a config value (`"double"` or `"single"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "double" => Some(Self::Double),
            "single" => Some(Self::Single),
            _ => None,
        }
    }
}

/// Flags string literals that use the non-preferred quote style.
#[derive(Debug, Clone)]
pub struct StringQuotes {
    /// Quote style to enforce.
    pub preferred: QuoteStyle,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for StringQuotes {
    fn default() -> Self {
        Self::new()
    }
}

impl StringQuotes {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            preferred: QuoteStyle::Double,
            severity: Severity::Warning,
        }
    }

    /// Sets the preferred quote style.
    #[must_use]
    pub fn preferred(mut self, preferred: QuoteStyle) -> Self {
        self.preferred = preferred;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn violation(
        &self,
        node: Node<'_>,
        ctx: &FileContext<'_>,
        message: &str,
        fixed: String,
    ) -> Violation {
        Violation::new(CODE, NAME, self.severity, ctx.location_of(node), message)
            .with_suggestion(Suggestion::new(format!("Use {fixed}")))
    }
}

/// Content between the delimiters of a `'...'` or `"..."` literal.
fn inner(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    text.get(1..text.len() - 1)
}

/// True if double quotes would interpolate part of `content`
/// (`#{expr}`, `#@ivar`, `#@@cvar`, `#$gvar`).
fn has_interpolation_marker(content: &str) -> bool {
    ["#{", "#@", "#$"].iter().any(|m| content.contains(m))
}

impl Rule for StringQuotes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers double-quoted string literals unless the content contains a double quote"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::String]
    }

    fn check(&self, node: Node<'_>, ctx: &FileContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let text = node.text();
        // Percent literals (%q, %Q, %()) pick their own delimiters.
        let Some(content) = inner(text) else {
            return Ok(Vec::new());
        };

        let violation = match (self.preferred, text.as_bytes()[0]) {
            (QuoteStyle::Double, b'\'') => {
                // Escapes and interpolation markers change meaning inside double quotes.
                if content.contains('"')
                    || content.contains('\\')
                    || has_interpolation_marker(content)
                {
                    return Ok(Vec::new());
                }
                self.violation(
                    node,
                    ctx,
                    "Prefer double-quoted strings unless the literal contains a double quote",
                    format!("\"{content}\""),
                )
            }
            (QuoteStyle::Single, b'"') => {
                let dynamic = node.children().any(|c| {
                    matches!(c.grammar_kind(), "interpolation" | "escape_sequence")
                });
                if dynamic
                    || content.contains('\'')
                    || content.contains('\\')
                    || has_interpolation_marker(content)
                {
                    return Ok(Vec::new());
                }
                self.violation(
                    node,
                    ctx,
                    "Prefer single-quoted strings when no interpolation or escapes are needed",
                    format!("'{content}'"),
                )
            }
            _ => return Ok(Vec::new()),
        };

        Ok(vec![violation])
    }
}

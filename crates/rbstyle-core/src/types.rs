//! Core types for style violations, tooling faults and results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::syntax::Span;

/// Severity level for style violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Deviation from the guide that should be addressed.
    Warning,
    /// Deviation that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as reported to the user.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a location covering a syntax span.
    #[must_use]
    pub fn from_span(file: PathBuf, span: Span) -> Self {
        Self {
            file,
            line: span.start_line,
            column: span.start_column,
            offset: span.start_byte,
            length: span.len(),
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A style violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "RB004").
    pub code: String,
    /// Rule name (e.g., "hashes").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the offending code.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{} {}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.rule,
            self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (help: {})", suggestion.message)?;
        }
        Ok(())
    }
}

/// What kind of tooling failure stopped a file from being linted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    /// The file could not be read.
    Io,
    /// The parser rejected the file.
    Parse,
    /// A rule returned an error or panicked.
    Rule,
    /// The worker processing the file died.
    Internal,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::Parse => write!(f, "parse"),
            Self::Rule => write!(f, "rule"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// A tooling failure that caused one file to be skipped.
///
/// Faults are reported separately from violations so that consumers can
/// tell a style issue from a broken tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFault {
    /// File that was skipped.
    pub file: PathBuf,
    /// Failure category.
    pub kind: FaultKind,
    /// Name of the failing rule, for [`FaultKind::Rule`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Description of the failure.
    pub message: String,
}

impl FileFault {
    /// Creates a new fault.
    #[must_use]
    pub fn new(file: impl AsRef<Path>, kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            kind,
            rule: None,
            message: message.into(),
        }
    }

    /// Attributes the fault to a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

impl std::fmt::Display for FileFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: tool-error [{}]", self.file.display(), self.kind)?;
        if let Some(rule) = &self.rule {
            write!(f, " in rule '{rule}'")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Result of running a lint pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, ordered by file then location.
    pub violations: Vec<Violation>,
    /// Files skipped because of tooling faults, ordered by file.
    #[serde(default)]
    pub faults: Vec<FileFault>,
    /// Number of files fully linted.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.faults.is_empty()
    }

    /// Returns true if any file hit a tooling fault.
    #[must_use]
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Returns violations produced by the named rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.violations.iter().filter(|v| v.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}

//! Formatting of lint results and exit status.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::types::{FileFault, LintResult, Severity, Violation};

/// Exit status when nothing was reported.
pub const EXIT_CLEAN: i32 = 0;
/// Exit status when style violations were found.
pub const EXIT_VIOLATIONS: i32 = 1;
/// Exit status when at least one file hit a tooling fault.
pub const EXIT_FAULT: i32 = 2;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text with a summary line.
    #[default]
    Text,
    /// One plain line per finding, no summary.
    Compact,
    /// Pretty-printed JSON of the whole result.
    Json,
}

/// Writes lint results in a chosen format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: ReportFormat,
    color: bool,
}

impl Reporter {
    /// Creates a reporter for `format`, without color.
    #[must_use]
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            color: false,
        }
    }

    /// Enables ANSI colors in text output.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Writes `result` to `out`.
    ///
    /// In text and compact formats every violation and every fault takes
    /// exactly one line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write<W: Write>(&self, result: &LintResult, out: &mut W) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => self.write_text(result, out),
            ReportFormat::Compact => write_compact(result, out),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, result)?;
                writeln!(out)
            }
        }
    }

    /// Renders `result` into a string.
    #[must_use]
    pub fn render(&self, result: &LintResult) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(result, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Process exit status for `result`.
    #[must_use]
    pub fn exit_code(result: &LintResult) -> i32 {
        if result.has_faults() {
            EXIT_FAULT
        } else if result.violations.is_empty() {
            EXIT_CLEAN
        } else {
            EXIT_VIOLATIONS
        }
    }

    fn write_text<W: Write>(&self, result: &LintResult, out: &mut W) -> io::Result<()> {
        let (errors, warnings, infos) = result.count_by_severity();

        for violation in &result.violations {
            self.write_violation_line(violation, out)?;
        }
        for fault in &result.faults {
            self.write_fault_line(fault, out)?;
        }

        if !result.violations.is_empty() || !result.faults.is_empty() {
            writeln!(out)?;
        }

        let summary_color = if !result.faults.is_empty() || errors > 0 {
            "\x1b[31m"
        } else if warnings > 0 {
            "\x1b[33m"
        } else {
            "\x1b[32m"
        };

        let mut summary = format!(
            "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, result.files_checked
        );
        if !result.faults.is_empty() {
            summary.push_str(&format!(
                "; {} file(s) skipped due to tool errors",
                result.faults.len()
            ));
        }
        writeln!(out, "{}", self.paint(summary_color, &summary))
    }

    fn write_violation_line<W: Write>(&self, v: &Violation, out: &mut W) -> io::Result<()> {
        let color = match v.severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[34m",
        };
        write!(
            out,
            "{}:{}:{}: {} [{} {}] {}",
            v.location.file.display(),
            v.location.line,
            v.location.column,
            self.paint(color, &v.severity.to_string()),
            v.code,
            v.rule,
            v.message,
        )?;
        if let Some(suggestion) = &v.suggestion {
            write!(out, " (help: {})", suggestion.message)?;
        }
        writeln!(out)
    }

    fn write_fault_line<W: Write>(&self, fault: &FileFault, out: &mut W) -> io::Result<()> {
        let line = fault.to_string();
        writeln!(out, "{}", self.paint("\x1b[35m", &line))
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn write_compact<W: Write>(result: &LintResult, out: &mut W) -> io::Result<()> {
    for violation in &result.violations {
        writeln!(out, "{violation}")?;
    }
    for fault in &result.faults {
        writeln!(out, "{fault}")?;
    }
    Ok(())
}

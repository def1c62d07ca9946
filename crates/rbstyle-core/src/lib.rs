//! # rbstyle-core
//!
//! Core framework for style linting of Ruby sources.
//!
//! This crate provides the foundational traits and types for building
//! style linters. It includes:
//!
//! - [`SyntaxTree`] and [`Node`], a read-only tree produced by a [`SourceParser`]
//! - [`Rule`] trait for per-node style checks
//! - [`Walker`] for dispatching nodes to the rules that declared their kind
//! - [`Analyzer`] for orchestrating lint execution over many files
//! - [`Reporter`] for rendering a [`LintResult`] and choosing an exit status
//!
//! ## Example
//!
//! ```ignore
//! use rbstyle_core::{Analyzer, Reporter, ReportFormat};
//!
//! let analyzer = Analyzer::builder()
//!     .path("./app")
//!     .parser(RubyParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze().await?;
//! Reporter::new(ReportFormat::Text).write(&result, &mut std::io::stdout())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod report;
mod rule;
mod syntax;
mod types;
mod walker;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{display_path, FileContext};
pub use parser::{ParseError, SourceParser};
pub use report::{ReportFormat, Reporter, EXIT_CLEAN, EXIT_FAULT, EXIT_VIOLATIONS};
pub use rule::{Rule, RuleBox, RuleError};
pub use syntax::{Node, NodeId, NodeKind, NodeSpec, Span, SyntaxTree};
pub use types::{FaultKind, FileFault, LintResult, Location, Severity, Suggestion, Violation};
pub use utils::allowance::{AllowCheck, AllowIndex};
pub use walker::{WalkError, Walker};

//! # rbstyle-rules
//!
//! Built-in Ruby style rules for rbstyle.
//!
//! Each rule inspects one or more node kinds and reports departures from
//! the style guide.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RB001 | `strings` | Prefers double-quoted string literals |
//! | RB002 | `blocks` | Braces for one-line blocks, `do...end` for multi-line ones |
//! | RB003 | `collections` | One element per line with a trailing comma |
//! | RB004 | `hashes` | Prefers `Hash#fetch` over `[]` reads with literal keys |
//! | RB005 | `methods` | Parenthesized parameters, no empty `()` |
//! | RB006 | `classes` | Nested CamelCase class and module definitions |
//! | RB007 | `constants` | `SCREAMING_SNAKE_CASE` value constants |
//! | RB008 | `inheritance` | No computed superclasses or core value class parents |
//!
//! ## Usage
//!
//! ```ignore
//! use rbstyle_core::Analyzer;
//! use rbstyle_rules::{PreferFetch, StringQuotes};
//! use rbstyle_ruby::RubyParser;
//!
//! let analyzer = Analyzer::builder()
//!     .path("./app")
//!     .parser(RubyParser::new())
//!     .rule(StringQuotes::new())
//!     .rule(PreferFetch::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod blocks;
pub mod classes;
pub mod collections;
pub mod constants;
pub mod hashes;
pub mod inheritance;
pub mod methods;
mod presets;
pub mod strings;

#[cfg(test)]
mod test_support;

pub use blocks::BlockDelimiters;
pub use classes::ClassDefinition;
pub use collections::CollectionLayout;
pub use constants::ConstantNaming;
pub use hashes::PreferFetch;
pub use inheritance::SuperclassStyle;
pub use methods::MethodParens;
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, strict_rules,
    Preset,
};
pub use strings::{QuoteStyle, StringQuotes};

/// Re-export core types for convenience.
pub use rbstyle_core::{Rule, Severity, Violation};

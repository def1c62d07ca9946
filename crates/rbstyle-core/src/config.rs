//! Configuration types for rbstyle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Top-level configuration for rbstyle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to start from (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block for a rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of files linted at once.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string(), "**/node_modules/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Reads option `key` of `rule` as `T`, or `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the value does not have the
    /// expected TOML type.
    pub fn get_option<T: serde::de::DeserializeOwned>(
        &self,
        rule: &str,
        key: &str,
    ) -> Result<Option<T>, ConfigError> {
        self.options
            .get(key)
            .map(|v| {
                v.clone().try_into::<T>().map_err(|e| ConfigError::Invalid {
                    key: format!("rules.{rule}.{key}"),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Rejects options of `rule` that are not in `known`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first unknown key.
    pub fn check_option_keys(&self, rule: &str, known: &[&str]) -> Result<(), ConfigError> {
        let mut unknown: Vec<&String> = self
            .options
            .keys()
            .filter(|k| !known.contains(&k.as_str()))
            .collect();
        unknown.sort();

        let Some(key) = unknown.first() else {
            return Ok(());
        };
        let message = if known.is_empty() {
            "unknown option (this rule takes no options)".to_string()
        } else {
            format!("unknown option (expected one of: {})", known.join(", "))
        };
        Err(ConfigError::Invalid {
            key: format!("rules.{rule}.{key}"),
            message,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value is well-formed TOML but not acceptable.
    #[error("Invalid config value for {key}: {message}")]
    Invalid {
        /// Dotted key of the offending value.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

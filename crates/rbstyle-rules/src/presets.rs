//! Rule presets and construction of the rule registry from configuration.

use crate::{
    BlockDelimiters, ClassDefinition, CollectionLayout, ConstantNaming, MethodParens, PreferFetch,
    QuoteStyle, StringQuotes, SuperclassStyle,
};
use rbstyle_core::{Config, ConfigError, RuleBox, RuleConfig, Severity};
use tracing::debug;

/// Preset configurations for rbstyle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule with sensible defaults.
    #[default]
    Recommended,
    /// Every rule at error severity.
    Strict,
    /// Quoting and block rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Looks up a preset by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Config name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Severity every rule in the preset starts from, if the preset fixes one.
    fn severity(self) -> Option<Severity> {
        match self {
            Self::Strict => Some(Severity::Error),
            Self::Recommended | Self::Minimal => None,
        }
    }
}

/// Returns all available rules, in registry order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(StringQuotes::new()),
        Box::new(BlockDelimiters::new()),
        Box::new(CollectionLayout::new()),
        Box::new(PreferFetch::new()),
        Box::new(MethodParens::new()),
        Box::new(ClassDefinition::new()),
        Box::new(ConstantNaming::new()),
        Box::new(SuperclassStyle::new()),
    ]
}

/// Returns the recommended set of rules: every rule with default settings.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the strict set of rules.
///
/// Every rule at error severity, so inline allow directives must carry a
/// reason.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(StringQuotes::new().severity(Severity::Error)),
        Box::new(BlockDelimiters::new().severity(Severity::Error)),
        Box::new(CollectionLayout::new().severity(Severity::Error)),
        Box::new(PreferFetch::new().severity(Severity::Error)),
        Box::new(MethodParens::new().severity(Severity::Error)),
        Box::new(ClassDefinition::new().severity(Severity::Error)),
        Box::new(ConstantNaming::new().severity(Severity::Error)),
        Box::new(SuperclassStyle::new().severity(Severity::Error)),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `strings` (RB001)
/// - `blocks` (RB002)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(StringQuotes::new()),
        Box::new(BlockDelimiters::new()),
    ]
}

/// Finds a rule by name (`hashes`) or code (`RB004`).
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|r| r.name() == name || r.code().eq_ignore_ascii_case(name))
}

/// Builds the rule set described by `config`.
///
/// Starts from the configured preset (default: recommended), adds rules the
/// config enables explicitly, drops disabled ones and applies per-rule
/// options and severities.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for an unknown preset, an unknown rule
/// name, or an option value of the wrong shape.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = match config.preset.as_deref() {
        None => Preset::default(),
        Some(name) => Preset::from_name(name).ok_or_else(|| ConfigError::Invalid {
            key: "preset".to_string(),
            message: format!("unknown preset '{name}' (expected recommended, strict or minimal)"),
        })?,
    };

    let known: Vec<&'static str> = all_rules().iter().map(|r| r.name()).collect();
    let mut unknown: Vec<&String> = config
        .rules
        .keys()
        .filter(|k| !known.contains(&k.as_str()))
        .collect();
    unknown.sort();
    if let Some(key) = unknown.first() {
        return Err(ConfigError::Invalid {
            key: format!("rules.{key}"),
            message: format!("unknown rule (expected one of: {})", known.join(", ")),
        });
    }

    let in_preset: Vec<&'static str> = preset.rules().iter().map(|r| r.name()).collect();
    let mut rules = Vec::new();
    for name in known {
        let rule_config = config.rule_config(name);
        let explicitly_enabled = rule_config.and_then(|c| c.enabled) == Some(true);
        if !in_preset.contains(&name) && !explicitly_enabled {
            continue;
        }
        if !config.is_rule_enabled(name) {
            debug!("Rule disabled by config: {}", name);
            continue;
        }
        let severity = config.rule_severity(name).or(preset.severity());
        rules.push(build_rule(name, severity, rule_config)?);
    }

    debug!("Preset '{}' resolved to {} rule(s)", preset.name(), rules.len());
    Ok(rules)
}

fn invalid(rule: &str, option: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: format!("rules.{rule}.{option}"),
        message: message.into(),
    }
}

/// Options each rule accepts besides `enabled` and `severity`.
fn known_options(name: &str) -> &'static [&'static str] {
    match name {
        crate::strings::NAME => &["preferred"],
        crate::collections::NAME => &["min_elements", "trailing_comma"],
        crate::hashes::NAME => &["allow_in_tests"],
        crate::inheritance::NAME => &["forbidden"],
        _ => &[],
    }
}

fn build_rule(
    name: &str,
    severity: Option<Severity>,
    config: Option<&RuleConfig>,
) -> Result<RuleBox, ConfigError> {
    let default = RuleConfig::default();
    let config = config.unwrap_or(&default);
    config.check_option_keys(name, known_options(name))?;

    let rule: RuleBox = match name {
        crate::strings::NAME => {
            let mut rule = StringQuotes::new();
            if let Some(preferred) = config.get_option::<String>(name, "preferred")? {
                let style = QuoteStyle::from_name(&preferred).ok_or_else(|| {
                    invalid(
                        name,
                        "preferred",
                        format!("expected \"double\" or \"single\", got \"{preferred}\""),
                    )
                })?;
                rule = rule.preferred(style);
            }
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::blocks::NAME => {
            let mut rule = BlockDelimiters::new();
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::collections::NAME => {
            let mut rule = CollectionLayout::new();
            if let Some(min) = config.get_option::<i64>(name, "min_elements")? {
                let min = usize::try_from(min)
                    .ok()
                    .filter(|m| *m >= 1)
                    .ok_or_else(|| invalid(name, "min_elements", "must be a positive integer"))?;
                rule = rule.min_elements(min);
            }
            if let Some(trailing) = config.get_option::<bool>(name, "trailing_comma")? {
                rule = rule.trailing_comma(trailing);
            }
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::hashes::NAME => {
            let mut rule = PreferFetch::new();
            if let Some(allow) = config.get_option::<bool>(name, "allow_in_tests")? {
                rule = rule.allow_in_tests(allow);
            }
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::methods::NAME => {
            let mut rule = MethodParens::new();
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::classes::NAME => {
            let mut rule = ClassDefinition::new();
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::constants::NAME => {
            let mut rule = ConstantNaming::new();
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        crate::inheritance::NAME => {
            let mut rule = SuperclassStyle::new();
            if let Some(forbidden) = config.get_option::<Vec<String>>(name, "forbidden")? {
                rule = rule.forbidden(forbidden);
            }
            if let Some(s) = severity {
                rule = rule.severity(s);
            }
            Box::new(rule)
        }
        other => {
            return Err(ConfigError::Invalid {
                key: format!("rules.{other}"),
                message: "unknown rule".to_string(),
            })
        }
    };
    Ok(rule)
}

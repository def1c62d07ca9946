//! Check command implementation.

use anyhow::{bail, Context, Result};
use rbstyle_core::{Analyzer, Config, Reporter, RuleBox};
use rbstyle_rules::{rule_by_name, rules_from_config};
use rbstyle_ruby::RubyParser;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config_resolver;
use crate::OutputFormat;

/// Options for one `rbstyle check` run.
pub struct CheckArgs {
    /// Files or directories to lint.
    pub paths: Vec<PathBuf>,
    /// Report format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of the configured set.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Disable ANSI colors.
    pub no_color: bool,
}

/// Runs the check command and returns the process exit status.
pub async fn run(args: CheckArgs, config_path: Option<&Path>) -> Result<i32> {
    let project = config_resolver::project_dir(&args.paths);
    let config = config_resolver::resolve(&project, config_path).load()?;

    let configured = rules_from_config(&config).context("Invalid rule configuration")?;
    let rules = match args.rules.as_deref() {
        Some(filter) => select_rules(configured, filter, &config)?,
        None => configured,
    };

    let analyzer = Analyzer::builder()
        .paths(args.paths.iter().cloned())
        .parser(RubyParser::new())
        .rules(rules)
        .excludes(args.exclude)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    info!(
        "Checking {:?} with rules: {}",
        args.paths,
        analyzer.rule_names().join(", ")
    );

    let result = analyzer.analyze().await.context("Analysis failed")?;

    let color = !args.no_color
        && matches!(args.format, OutputFormat::Text)
        && std::io::stdout().is_terminal();
    let reporter = Reporter::new(args.format.into()).color(color);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    reporter
        .write(&result, &mut out)
        .context("Failed to write report")?;
    out.flush()?;

    Ok(Reporter::exit_code(&result))
}

fn matches_rule(rule: &RuleBox, name: &str) -> bool {
    rule.name() == name || rule.code().eq_ignore_ascii_case(name)
}

/// Narrows the configured rules to `filter`, falling back to default
/// instances for rules the configuration left out.
///
/// Naming a rule that the configuration disables is an error, since the
/// analyzer would drop it and lint with nothing.
fn select_rules(
    mut configured: Vec<RuleBox>,
    filter: &str,
    config: &Config,
) -> Result<Vec<RuleBox>> {
    let mut selected: Vec<RuleBox> = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if selected.iter().any(|r| matches_rule(r, name)) {
            continue;
        }
        if let Some(pos) = configured.iter().position(|r| matches_rule(r, name)) {
            selected.push(configured.swap_remove(pos));
        } else if let Some(rule) = rule_by_name(name) {
            if !config.is_rule_enabled(rule.name()) {
                bail!(
                    "Rule '{}' is disabled in the configuration; enable it under [rules.{}]",
                    rule.name(),
                    rule.name()
                );
            }
            selected.push(rule);
        } else {
            warn!("Unknown rule: {}", name);
        }
    }

    if selected.is_empty() {
        bail!("No known rules in --rules '{filter}' (see `rbstyle list-rules`)");
    }
    selected.sort_by_key(|r| r.code());
    Ok(selected)
}

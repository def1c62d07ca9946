//! List rules command implementation.

use rbstyle_rules::{all_rules, Preset};

/// Renders the rule table and preset summary.
#[must_use]
pub fn render() -> String {
    let mut out = String::from("Available rules:\n\n");
    out.push_str(&format!("{:<8} {:<14} {:<9} Description\n", "Code", "Name", "Severity"));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for rule in all_rules() {
        out.push_str(&format!(
            "{:<8} {:<14} {:<9} {}\n",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        ));
    }

    out.push_str("\nPresets:\n");
    for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        let note = match preset {
            Preset::Recommended => " (default)",
            Preset::Strict => ", all at error severity",
            Preset::Minimal => ", for gradual adoption",
        };
        out.push_str(&format!("  {:<12} - {}{}\n", preset.name(), codes.join(", "), note));
    }

    out.push_str("\nUse --rules to run specific rules, e.g.:\n");
    out.push_str("  rbstyle check --rules strings,hashes\n");
    out.push_str("  rbstyle check --rules RB001,RB004\n");
    out
}

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_once() {
        let out = render();
        for rule in all_rules() {
            assert!(out.contains(rule.code()), "{}", rule.code());
            assert!(out.contains(rule.description()));
        }
        assert!(out.contains("minimal      - RB001, RB002, for gradual adoption"));
    }
}

//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# rbstyle configuration
# Rules: run `rbstyle list-rules` for codes and descriptions.

# Starting rule set: "recommended" (default), "strict" or "minimal"
preset = "recommended"

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/node_modules/**",
    "**/db/schema.rb",
]

# Respect .gitignore files
respect_gitignore = true

# Maximum number of files linted at once (default: number of CPUs)
# parallelism = 8

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden.
# Inline: `# rbstyle: allow(hashes) reason="..."` on the line or the line above.

[rules.strings]
enabled = true
# severity = "error"  # Override default severity
preferred = "double"

[rules.collections]
min_elements = 2
trailing_comma = true

[rules.hashes]
allow_in_tests = true

# [rules.inheritance]
# forbidden = ["Array", "Hash", "String", "Set"]
"#;

/// Writes the default configuration into `dir` and returns its path.
///
/// # Errors
///
/// Fails if the file exists and `force` is false, or the write fails.
pub fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join("rbstyle.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit rbstyle.toml to configure rules");
    println!("  2. Run: rbstyle check");

    Ok(())
}

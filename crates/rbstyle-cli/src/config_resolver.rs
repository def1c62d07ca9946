//! Configuration file lookup with a global fallback.
//!
//! Priority, first match wins:
//!
//! 1. `--config` flag
//! 2. `rbstyle.toml` or `.rbstyle.toml` in the project directory
//! 3. `config.toml` in the global directory (`$RBSTYLE_CONFIG_DIR`, else `~/.rbstyle/`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use rbstyle_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["rbstyle.toml", ".rbstyle.toml"];

/// Config file name inside the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

/// Directory whose config applies to `paths`: the first path if it is a
/// directory, its parent if it is a file, else the current directory.
#[must_use]
pub fn project_dir(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) => p
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        None => PathBuf::from("."),
    }
}

/// Global directory is a parameter so tests do not race on env vars.
fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    if let Some(candidate) = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
    {
        debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

/// Returns the global config directory: `$RBSTYLE_CONFIG_DIR`, else `~/.rbstyle/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("RBSTYLE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".rbstyle"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("rbstyle.toml"), "").unwrap();

        let source = resolve_in(tmp.path(), Some(&explicit), None);
        assert_eq!(source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_path_is_not_checked_until_load() {
        let source = resolve_in(Path::new("/tmp"), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            source,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
        assert!(source.load().is_err());
    }

    #[test]
    fn project_names_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".rbstyle.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".rbstyle.toml"))
        );

        fs::write(tmp.path().join("rbstyle.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("rbstyle.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let source = resolve_in(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(source, ConfigSource::Global(global.path().join("config.toml")));

        fs::write(project.path().join("rbstyle.toml"), "").unwrap();
        let source = resolve_in(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_falls_back_to_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let source = resolve_in(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
    }

    #[test]
    fn load_parses_project_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("rbstyle.toml"),
            "preset = \"minimal\"\n[rules.blocks]\nenabled = false\n",
        )
        .unwrap();

        let config = resolve_in(tmp.path(), None, None).load().unwrap();
        assert_eq!(config.preset.as_deref(), Some("minimal"));
        assert!(!config.is_rule_enabled("blocks"));
    }

    #[test]
    fn load_reports_invalid_toml_with_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("rbstyle.toml"), "preset = [").unwrap();
        let err = resolve_in(tmp.path(), None, None).load().unwrap_err();
        assert!(format!("{err:#}").contains("rbstyle.toml"));
    }

    #[test]
    fn project_dir_from_paths() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("app.rb");
        fs::write(&file, "").unwrap();

        assert_eq!(project_dir(&[tmp.path().to_path_buf()]), tmp.path());
        assert_eq!(project_dir(&[file]), tmp.path());
        assert_eq!(project_dir(&[PathBuf::from("app.rb")]), PathBuf::from("."));
        assert_eq!(project_dir(&[]), PathBuf::from("."));
    }
}

//! Configuration file resolution and loading.
//!
//! Lookup order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/client-lint.toml` or `.client-lint.toml`
//! 3. `$CLIENT_LINT_CONFIG_DIR/config.toml`, else `~/.client-lint/config.toml`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use client_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the analyzed directory.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
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
}

const PROJECT_CONFIG_NAMES: &[&str] = &["client-lint.toml", ".client-lint.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "CLIENT_LINT_CONFIG_DIR";

/// Resolves which configuration file applies to `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |found| {
            tracing::debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        })
}

/// User-wide config directory: `$CLIENT_LINT_CONFIG_DIR`, else `~/.client-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".client-lint")))
}

/// Loads the configuration a source points at.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid configuration.
pub fn load(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if matches!(source, ConfigSource::Global(_)) {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_without_existence_check() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("client-lint.toml"), "").unwrap();

        let result = resolve_in(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_names_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".client-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".client-lint.toml"))
        );

        fs::write(tmp.path().join("client-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("client-lint.toml"))
        );
    }

    #[test]
    fn global_only_when_project_has_none() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_dir = Some(global.path().to_path_buf());

        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Default
        );

        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("client-lint.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, global_dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn load_default_and_file() {
        assert!(load(&ConfigSource::Default).unwrap().rules.is_empty());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("client-lint.toml");
        fs::write(&path, "fail_on = \"error\"\n[rules.C4715]\nenabled = false\n").unwrap();
        let config = load(&ConfigSource::Project(path)).unwrap();
        assert_eq!(config.fail_threshold(), client_lint_core::Severity::Error);
        assert!(!config.is_message_enabled(client_lint_core::MessageId::IncorrectReturnType));
    }

    #[test]
    fn load_reports_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("client-lint.toml");
        fs::write(&path, "fail_on = [").unwrap();
        let err = load(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}

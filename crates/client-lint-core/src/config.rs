//! Configuration types for client-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::message::MessageId;
use crate::Severity;

/// Top-level configuration for client-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lowest severity that makes a check run fail (default: warning).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by checker name, message symbol or message code.
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
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
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

    /// Checks if a checker is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Checks if a message is enabled, by symbol or code.
    #[must_use]
    pub fn is_message_enabled(&self, id: MessageId) -> bool {
        self.message_config(id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a message, falling back to its checker.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str, id: MessageId) -> Option<Severity> {
        self.message_config(id)
            .and_then(|c| c.severity)
            .or_else(|| self.rules.get(rule_name).and_then(|c| c.severity))
    }

    /// Gets the configuration for a checker.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Disables a checker or message by name, symbol or code.
    pub fn disable(&mut self, key: impl Into<String>) {
        self.rules.entry(key.into()).or_default().enabled = Some(false);
    }

    /// Severity threshold for failing a run.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Warning)
    }

    fn message_config(&self, id: MessageId) -> Option<&RuleConfig> {
        self.rules
            .get(id.symbol())
            .or_else(|| self.rules.get(id.code()))
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/.venv/**".to_string(),
        "**/venv/**".to_string(),
        "**/__pycache__/**".to_string(),
    ]
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
    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Warning);
        for id in MessageId::ALL {
            assert!(config.is_message_enabled(id));
        }
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "error"

[analyzer]
root = "./sdk"
exclude = ["**/generated/**"]

[rules.constructor-configuration]
severity = "error"
parameter = "config"

[rules.missing-configuration-factory-method-kwargs]
enabled = false

[rules.C4715]
severity = "info"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./sdk"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert_eq!(config.fail_threshold(), Severity::Error);

        assert!(config.is_rule_enabled("constructor-configuration"));
        assert!(!config.is_message_enabled(MessageId::MissingFactoryKwargs));
        assert!(config.is_message_enabled(MessageId::MissingFactoryMethod));

        assert_eq!(
            config.rule_severity("constructor-configuration", MessageId::MissingConfigParameter),
            Some(Severity::Error)
        );
        assert_eq!(
            config.rule_severity("client-return-value", MessageId::IncorrectReturnType),
            Some(Severity::Info)
        );
        assert_eq!(
            config.rule_severity("client-configuration-factory", MessageId::MissingFactoryMethod),
            None
        );

        let rule = config.rule_config("constructor-configuration").unwrap();
        assert_eq!(rule.get_str("parameter", "configuration"), "config");
    }

    #[test]
    fn test_disable_by_code() {
        let mut config = Config::default();
        config.disable("C4713");
        assert!(!config.is_message_enabled(MessageId::MissingFactoryMethod));
        assert!(config.is_message_enabled(MessageId::MissingFactoryKwargs));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("fail_on = ["),
            Err(ConfigError::Parse { .. })
        ));
    }
}

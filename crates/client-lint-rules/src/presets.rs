//! Rule presets and config-driven rule construction.

use crate::{
    configuration_factory, constructor_configuration, ConfigurationFactory,
    ConstructorTakesConfiguration, ReturnMatchesName,
};
use client_lint_core::{Config, RuleBox};

/// Preset configurations for client-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Configuration conventions only.
    Recommended,
    /// Every built-in checker.
    All,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::All => all_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `constructor-configuration` (C4712)
/// - `client-configuration-factory` (C4713, C4714)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ConstructorTakesConfiguration::new()),
        Box::new(ConfigurationFactory::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ConstructorTakesConfiguration::new()),
        Box::new(ConfigurationFactory::new()),
        Box::new(ReturnMatchesName::new()),
    ]
}

/// Builds every rule with options taken from `config`.
///
/// Enable flags are not applied here; the analyzer skips disabled
/// checkers and drops disabled messages.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let constructor = config
        .rule_config(constructor_configuration::NAME)
        .map_or_else(
            ConstructorTakesConfiguration::new,
            ConstructorTakesConfiguration::from_config,
        );
    let factory = config
        .rule_config(configuration_factory::NAME)
        .map_or_else(ConfigurationFactory::new, ConfigurationFactory::from_config);

    vec![
        Box::new(constructor),
        Box::new(factory),
        Box::new(ReturnMatchesName::new()),
    ]
}

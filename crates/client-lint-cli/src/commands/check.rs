//! Check command implementation.

use anyhow::{Context, Result};
use client_lint_core::{Analyzer, Config, RuleBox, Severity};
use client_lint_python::PythonParser;
use client_lint_rules::rules_from_config;
use std::path::PathBuf;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Options for one `check` run.
#[derive(Debug, Default)]
pub struct CheckArgs {
    /// Directory to analyze.
    pub path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Checkers or messages to keep; empty keeps all.
    pub rules: Vec<String>,
    /// Checkers or messages to disable.
    pub disable: Vec<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Fail threshold overriding the config.
    pub fail_on: Option<Severity>,
}

/// Runs the check command. Returns `false` when the run should fail.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<bool> {
    let mut config = config_resolver::load(source)?;
    for key in &args.disable {
        config.disable(key.as_str());
    }
    let threshold = args.fail_on.unwrap_or_else(|| config.fail_threshold());

    let rules = select_rules(rules_from_config(&config), &args.rules, &mut config);

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .parser(PythonParser::new())
        .config(config);
    for pattern in &args.exclude {
        builder = builder.exclude(pattern.as_str());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} checkers",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;
    if result.files_skipped > 0 {
        tracing::warn!("Skipped {} file(s) that could not be parsed", result.files_skipped);
    }

    super::output::print(&result, args.format, analyzer.root())?;

    Ok(!result.has_violations_at(threshold))
}

/// Keeps rules matching any key.
///
/// A checker name keeps the whole checker. A message symbol or code keeps
/// its checker with the checker's other messages disabled in `config`.
fn select_rules(rules: Vec<RuleBox>, keys: &[String], config: &mut Config) -> Vec<RuleBox> {
    if keys.is_empty() {
        return rules;
    }

    for key in keys {
        let known = rules.iter().any(|rule| {
            rule.name() == key
                || rule
                    .messages()
                    .iter()
                    .any(|id| id.code() == key || id.symbol() == key)
        });
        if !known {
            tracing::warn!("Unknown rule: {}", key);
        }
    }

    rules
        .into_iter()
        .filter(|rule| {
            if keys.iter().any(|key| key == rule.name()) {
                return true;
            }
            let (selected, others): (Vec<&client_lint_core::MessageId>, Vec<&client_lint_core::MessageId>) = rule.messages().iter().partition(|id| {
                keys.iter()
                    .any(|key| id.code() == key || id.symbol() == key)
            });
            if selected.is_empty() {
                return false;
            }
            for id in others {
                config.disable(id.symbol());
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_lint_core::MessageId;
    use client_lint_python::PythonParser;
    use client_lint_rules::all_rules;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn select_rules_by_name_symbol_or_code() {
        let keys = vec![
            "C4714".to_string(),
            "service-method-incorrect-return-type".to_string(),
        ];
        let mut config = Config::default();
        let selected = select_rules(all_rules(), &keys, &mut config);
        assert_eq!(
            names(&selected),
            vec!["client-configuration-factory", "client-return-value"]
        );
        assert!(!config.is_message_enabled(MessageId::MissingFactoryMethod));
        assert!(config.is_message_enabled(MessageId::MissingFactoryKwargs));

        let mut config = Config::default();
        let keys = ["client-configuration-factory".to_string()];
        let selected = select_rules(all_rules(), &keys, &mut config);
        assert_eq!(names(&selected), vec!["client-configuration-factory"]);
        assert!(config.is_message_enabled(MessageId::MissingFactoryMethod));
    }

    #[test]
    fn select_rules_empty_keeps_all() {
        let mut config = Config::default();
        assert_eq!(select_rules(all_rules(), &[], &mut config).len(), 3);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn message_key_reports_only_that_message() {
        let mut config = Config::default();
        let rules = select_rules(all_rules(), &["C4714".to_string()], &mut config);

        let mut builder = Analyzer::builder()
            .root("/repo")
            .parser(PythonParser::new())
            .config(config);
        for rule in rules {
            builder = builder.rule_box(rule);
        }
        let analyzer = builder.build().unwrap();

        let missing = analyzer
            .check_source(Path::new("/repo/a.py"), "class SomeClient:\n    pass\n")
            .unwrap();
        assert!(missing.is_empty());

        let no_kwargs = analyzer
            .check_source(
                Path::new("/repo/b.py"),
                "class SomeClient:\n    def create_configuration(self):\n        pass\n",
            )
            .unwrap();
        let codes: Vec<&str> = no_kwargs.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["C4714"]);
    }

    fn project(code: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_client.py"), code).unwrap();
        tmp
    }

    #[test]
    fn run_fails_on_warning_by_default() {
        let tmp = project("class SomeClient:\n    pass\n");
        let args = CheckArgs {
            path: tmp.path().to_path_buf(),
            format: OutputFormat::Compact,
            ..CheckArgs::default()
        };
        assert!(!run(&args, &ConfigSource::Default).unwrap());
    }

    #[test]
    fn run_passes_below_threshold() {
        let tmp = project("class SomeClient:\n    pass\n");
        let args = CheckArgs {
            path: tmp.path().to_path_buf(),
            format: OutputFormat::Compact,
            fail_on: Some(Severity::Error),
            ..CheckArgs::default()
        };
        assert!(run(&args, &ConfigSource::Default).unwrap());
    }

    #[test]
    fn run_honours_disable_and_config() {
        let tmp = project("class SomeClient:\n    def __init__(self):\n        pass\n");
        let config_path = tmp.path().join("client-lint.toml");
        fs::write(
            &config_path,
            "[rules.C4712]\nenabled = false\n",
        )
        .unwrap();

        let args = CheckArgs {
            path: tmp.path().to_path_buf(),
            format: OutputFormat::Json,
            disable: vec!["missing-configuration-factory-method".to_string()],
            ..CheckArgs::default()
        };
        assert!(run(&args, &ConfigSource::Project(config_path)).unwrap());
    }
}

//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# client-lint configuration

# Lowest severity that makes `client-lint check` exit with status 1
fail_on = "warning"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./sdk"

# Glob patterns to exclude from analysis
exclude = [
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
    "**/tests/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rules are keyed by checker name, message symbol or message code.
# Each can be enabled/disabled and have its severity overridden.

[rules.constructor-configuration]
enabled = true
# severity = "error"
parameter = "configuration"

[rules.client-configuration-factory]
enabled = true
method = "create_configuration"

# [rules.missing-configuration-factory-method-kwargs]
# enabled = false

# [rules.C4715]
# severity = "info"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("client-lint.toml"), force)?;

    println!("Created client-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit client-lint.toml to configure rules");
    println!("  2. Run: client-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_lint_core::{Config, MessageId, Severity};
    use tempfile::TempDir;

    #[test]
    fn template_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert!(config.is_message_enabled(MessageId::MissingFactoryKwargs));
        assert_eq!(
            config
                .rule_config("constructor-configuration")
                .unwrap()
                .get_str("parameter", ""),
            "configuration"
        );
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("client-lint.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}

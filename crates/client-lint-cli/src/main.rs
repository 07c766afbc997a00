//! client-lint CLI tool.
//!
//! Usage:
//! ```bash
//! client-lint check [OPTIONS] [PATH]
//! client-lint list-rules
//! client-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_lint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks Python SDK client classes against configuration and naming conventions
#[derive(Parser)]
#[command(name = "client-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CLIENT_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run convention checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run these checkers or messages (comma-separated names, symbols or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Disable these checkers or messages (comma-separated names, symbols or codes)
        #[arg(long)]
        disable: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest severity that fails the run [default: warning]
        #[arg(long)]
        fail_on: Option<Severity>,
    },

    /// List available checkers and messages
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source excerpts with labelled spans.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            disable,
            exclude,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let args = commands::check::CheckArgs {
                path,
                format,
                rules: split_list(rules.as_deref()),
                disable: split_list(disable.as_deref()),
                exclude,
                fail_on,
            };
            if !commands::check::run(&args, &source)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

/// Splits a comma-separated flag value, dropping empty entries.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn split_list_trims_entries() {
        assert_eq!(
            split_list(Some("C4712, client-return-value,,")),
            vec!["C4712".to_string(), "client-return-value".to_string()]
        );
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::try_parse_from([
            "client-lint",
            "check",
            "sdk",
            "--format",
            "pretty",
            "--fail-on",
            "error",
            "-e",
            "**/tests/**",
        ])
        .unwrap();
        let Commands::Check {
            path,
            format,
            fail_on,
            exclude,
            ..
        } = cli.command
        else {
            panic!("expected check");
        };
        assert_eq!(path, PathBuf::from("sdk"));
        assert_eq!(format, OutputFormat::Pretty);
        assert_eq!(fail_on, Some(Severity::Error));
        assert_eq!(exclude, vec!["**/tests/**".to_string()]);
    }
}

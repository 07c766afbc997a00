//! Shared output formatting for lint results.

use anyhow::Result;
use client_lint_core::{LintResult, Severity, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    let (errors, warnings, infos) = result.count_by_severity();

    for violation in &result.violations {
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.symbol(),
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(
            out,
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message
        );
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let _ = writeln!(
        out,
        "{summary_color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

/// Renders each violation with its source excerpt via miette.
fn print_pretty(result: &LintResult, root: &Path) {
    let mut sources: HashMap<&Path, Option<String>> = HashMap::new();

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        let content = sources
            .entry(file)
            .or_insert_with(|| std::fs::read_to_string(root.join(file)).ok());

        match content {
            Some(content) => {
                let report = Report::new(ViolationDiagnostic::from(violation)).with_source_code(
                    NamedSource::new(file.display().to_string(), content.clone()),
                );
                eprintln!("{report:?}");
            }
            None => eprint!("{}", violation.format()),
        }
    }

    let (errors, warnings, infos) = result.count_by_severity();
    eprintln!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_lint_core::{Location, MessageId, Suggestion, Violation};
    use std::path::PathBuf;

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(
            Violation::new(
                MessageId::MissingFactoryMethod,
                "client-configuration-factory",
                Severity::Warning,
                Location::new(PathBuf::from("storage/_client.py"), 19, 7),
            )
            .with_suggestion(Suggestion::new("Add `def create_configuration(**kwargs)`")),
        );
        result.violations.push(Violation::new(
            MessageId::IncorrectReturnType,
            "client-return-value",
            Severity::Error,
            Location::new(PathBuf::from("storage/_client.py"), 23, 9),
        ));
        result
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        storage/_client.py:19:7: warning [C4713] Is missing a create_configuration method. (missing-configuration-factory-method)
        storage/_client.py:23:9: error [C4715] Returns the wrong thing. (service-method-incorrect-return-type)
        ");
    }

    #[test]
    fn text_output_lists_help_and_summary() {
        let text = render_text(&sample());
        assert!(text.contains("C4713 missing-configuration-factory-method at storage/_client.py:19:7"));
        assert!(text.contains("  = help: Add `def create_configuration(**kwargs)`"));
        assert!(text.contains("Found 1 error(s), 1 warning(s), 0 info(s) in 2 file(s)"));
    }

    #[test]
    fn json_output_uses_symbols() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json["violations"][0]["id"],
            "missing-configuration-factory-method"
        );
        assert_eq!(json["violations"][1]["severity"], "error");
    }
}

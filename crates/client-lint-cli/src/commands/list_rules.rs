//! List rules command implementation.

use client_lint_rules::all_rules;
use std::fmt::Write as _;

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::from("Available checkers:\n\n");
    let _ = writeln!(out, "{:<8} {:<45} Checker", "Code", "Symbol");
    let _ = writeln!(out, "{}", "-".repeat(88));

    for rule in all_rules() {
        for id in rule.messages() {
            let _ = writeln!(out, "{:<8} {:<45} {}", id.code(), id.symbol(), rule.name());
            let _ = writeln!(out, "         {}", id.description());
        }
    }

    out.push_str("\nPresets:\n");
    out.push_str("  recommended  - C4712, C4713, C4714\n");
    out.push_str("  all          - every checker (default)\n");

    out.push_str("\nUse --rules or --disable with names, symbols or codes, e.g.:\n");
    out.push_str("  client-lint check --rules client-configuration-factory\n");
    out.push_str("  client-lint check --disable C4715\n");
    out
}

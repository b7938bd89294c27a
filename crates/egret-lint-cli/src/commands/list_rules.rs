//! List rules command implementation.

use egret_lint_rules::{all_rules, EGRET_TIPS};
use std::fmt::Write;

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::from("Available rules:\n\n");
    let _ = writeln!(out, "{:<8} {:<12} Description", "Code", "Name");
    let _ = writeln!(out, "{}", "-".repeat(72));

    for rule in all_rules() {
        let _ = writeln!(
            out,
            "{:<8} {:<12} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    out.push_str("\nChecks (ts-egret):\n");
    for (key, message) in EGRET_TIPS.iter() {
        let _ = writeln!(out, "  {key:<15} {message}");
    }

    out.push_str("\nDisable a rule in egret-lint.toml:\n");
    out.push_str("  [rules.ts-egret]\n  enabled = false\n");
    out
}

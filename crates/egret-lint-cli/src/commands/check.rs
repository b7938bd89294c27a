//! Check command implementation.

use anyhow::{Context, Result};
use egret_lint_core::Analyzer;
use egret_lint_rules::all_rules;
use egret_lint_ts::TypeScriptParser;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Without `path`, the root comes from the config (default: current
/// directory).
pub fn run(
    path: Option<&Path>,
    format: OutputFormat,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;

    let mut builder = Analyzer::builder()
        .config(config)
        .parser(TypeScriptParser::typescript())
        .parser(TypeScriptParser::tsx())
        .excludes(exclude);
    if let Some(path) = path {
        builder = builder.root(path);
    }
    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

//! Shared output formatting for lint results.

use anyhow::Result;
use egret_lint_core::{LintResult, ViolationDiagnostic};
use miette::{GraphicalReportHandler, NamedSource, Report};
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed directory; text output reads sources from it to
/// show snippets.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(result, root, &GraphicalReportHandler::new())?);
            print_summary(result);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
    }
    Ok(())
}

/// One miette report per violation, with a labelled source snippet when the
/// file can be read.
fn render_text(
    result: &LintResult,
    root: &Path,
    handler: &GraphicalReportHandler,
) -> Result<String> {
    let mut out = String::new();
    let mut source: Option<(&Path, String)> = None;

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        if source.as_ref().map_or(true, |(cached, _)| *cached != file) {
            source = std::fs::read_to_string(root.join(file))
                .ok()
                .map(|content| (file, content));
        }

        match &source {
            Some((_, content)) => {
                let report = Report::new(ViolationDiagnostic::from(violation)).with_source_code(
                    NamedSource::new(file.display().to_string(), content.clone()),
                );
                handler.render_report(&mut out, &*report)?;
                out.push('\n');
            }
            None => {
                out.push_str(&violation.format());
                out.push('\n');
            }
        }
    }

    Ok(out)
}

fn print_summary(result: &LintResult) {
    println!("{}", summary_line(result));
}

fn summary_line(result: &LintResult) -> String {
    let errors = result.error_count();
    let color = if errors > 0 { "\x1b[31m" } else { "\x1b[32m" };
    format!(
        "{color}Found {errors} error(s) in {} file(s)\x1b[0m",
        result.files_checked
    )
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    out
}

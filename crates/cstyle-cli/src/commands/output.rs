//! Shared output formatting for check results.

use anyhow::{Context, Result};
use cstyle_core::{DiagnosticReport, LintResult};

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Pretty => return print_pretty(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!(
            "{} at {}:{}:{}",
            diagnostic.check,
            diagnostic.file().display(),
            diagnostic.line(),
            diagnostic.column(),
        );
        println!("  \x1b[31merror\x1b[0m: {}", diagnostic.reason);
        println!();
    }

    print_failures(result);
    print_summary(result);
}

fn print_failures(result: &LintResult) {
    for failure in &result.failures {
        println!(
            "\x1b[33mskipped\x1b[0m {}: {}",
            failure.file.display(),
            failure.message
        );
    }
}

fn print_summary(result: &LintResult) {
    let summary_color = if result.has_diagnostics() {
        "\x1b[31m"
    } else if result.failures.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };

    println!(
        "{}Found {} problem(s) in {} file(s), {} file(s) not parsed\x1b[0m",
        summary_color,
        result.diagnostics.len(),
        result.files_checked,
        result.failures.len()
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
    for failure in &result.failures {
        println!("{}: {}", failure.file.display(), failure.message);
    }
}

fn print_pretty(result: &LintResult) -> Result<()> {
    for diagnostic in &result.diagnostics {
        let file = diagnostic.file();
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let report = miette::Report::new(DiagnosticReport::new(diagnostic, source));
        println!("{report:?}");
    }

    print_failures(result);
    print_summary(result);
    Ok(())
}

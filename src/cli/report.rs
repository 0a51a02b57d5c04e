//! Report formatting and printing utilities.
//!
//! Findings are displayed cargo-style. Kept apart from the pipeline so
//! keyschema can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, GenerateSummary, InitSummary, ManifestSummary, ValidateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
///
/// Findings are expected in report order (see `Ord for Issue`).
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

pub fn print(result: &CommandResult) {
    let mut out = io::stdout().lock();
    report_to(&result.issues, &mut out);
    print_summary_line_to(result, &mut out);
}

/// Print the per-command closing line.
pub fn print_summary_line_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Generate(summary) => print_generate(summary, result, writer),
        CommandSummary::Validate(summary) => print_validate(summary, result, writer),
        CommandSummary::Manifest(summary) => print_manifest(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based, in characters)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        if issues.len() == 1 {
            "problem"
        } else {
            "problems"
        },
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_generate<W: Write>(summary: &GenerateSummary, result: &CommandResult, writer: &mut W) {
    let Some(ref output) = summary.output else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Schema not written: fix the errors above and run again".red()
        );
        return;
    };

    if summary.is_check {
        if result.error_count == 0 {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "{} is up to date ({} {})",
                    output,
                    summary.key_count,
                    plural(summary.key_count, "key", "keys")
                )
                .green()
            );
        }
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} {} in {} {} from {} locale {} -> {}",
            summary.key_count,
            plural(summary.key_count, "key", "keys"),
            summary.namespace_count,
            plural(summary.namespace_count, "namespace", "namespaces"),
            result.locale_files_checked,
            plural(result.locale_files_checked, "file", "files"),
            output
        )
        .green()
    );
    if summary.deprecated_count > 0 {
        let _ = writeln!(writer, "  - deprecated: {}", summary.deprecated_count);
    }
    if let Some(ref hash) = summary.hash {
        let _ = writeln!(writer, "  - sha256: {}", hash.dimmed());
    }
}

fn print_validate<W: Write>(summary: &ValidateSummary, result: &CommandResult, writer: &mut W) {
    if summary.key_count.is_none() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Schema could not be derived; source files were not checked".red()
        );
        return;
    }

    if result.issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} in {} source {} - no issues found",
                summary.usage_count,
                plural(summary.usage_count, "key usage", "key usages"),
                result.source_files_checked,
                plural(result.source_files_checked, "file", "files")
            )
            .green()
        );
    }
}

fn print_manifest<W: Write>(summary: &ManifestSummary, writer: &mut W) {
    if !summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Manifest not written: fix the errors above and run again".red()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} to {}",
            summary.namespaces.len(),
            plural(summary.namespaces.len(), "namespace", "namespaces"),
            summary.path
        )
        .green()
    );
    if !summary.added.is_empty() {
        let _ = writeln!(writer, "  - added: {}", summary.added.join(", "));
    }
    if !summary.dropped.is_empty() {
        let _ = writeln!(writer, "  - dropped: {}", summary.dropped.join(", "));
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if let Some(ref error) = summary.error {
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), error);
    } else if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(ctx.source_line.as_str()),
        ),
        ReportLocation::Message(loc) => (loc.file_path.as_str(), loc.line, loc.col, None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::Message(_) | ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================

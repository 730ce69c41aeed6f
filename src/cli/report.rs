//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow mfv to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::CommonArgs,
    commands::{
        CommandKind, CommandResult, CommandSummary, EditSummary, HighlightSummary, LocaleOutcome,
        PrintMissingSummary, ValidateSummary,
    },
};
use crate::issues::{Issue, Severity, Totals};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, common: &CommonArgs) {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Validate(summary) if common.json => print_json_to(summary, stdout),
        CommandSummary::Validate(summary) => {
            report_to(summary, !common.no_issues, stdout);
            if result.totals.errors > 0 {
                eprintln!("\nErrors were reported in at least one locale. See details above.");
            }
        }
        CommandSummary::PrintMissing(summary) => print_missing_to(summary, stdout),
        CommandSummary::Edit(summary) => print_edit_to(result.kind, summary, stdout),
        CommandSummary::Highlight(summary) => print_highlight_to(summary, stdout),
    }
}

// ============================================================
// Validation
// ============================================================

/// Print every locale's issues, then the overall total.
pub fn report_to<W: Write>(summary: &ValidateSummary, show_issues: bool, writer: &mut W) {
    let mut totals = Totals::default();
    for outcome in &summary.locales {
        totals += outcome.totals.clone();
        if outcome.totals.problems() == 0 {
            continue;
        }

        let _ = writeln!(writer, "{}", outcome.file.underline());
        if show_issues {
            let _ = writeln!(writer);
            report_locale_to(outcome, writer);
        }
        let _ = writeln!(writer, "{}\n", summary_line(&outcome.totals));
    }

    let dirs: Vec<String> = summary
        .dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect();
    let _ = writeln!(
        writer,
        "{} {}",
        "Total".bold(),
        dirs.join(", ").dimmed()
    );
    if totals.problems() > 0 {
        let _ = writeln!(writer, "{}", summary_line(&totals).bold());
    } else {
        print_success_to(summary.locales.len(), totals.ignored, writer);
    }
}

/// Print the issues of one locale file.
pub fn report_locale_to<W: Write>(outcome: &LocaleOutcome, writer: &mut W) {
    let max_line_width = outcome
        .issues
        .iter()
        .map(|issue| issue.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for issue in &outcome.issues {
        let source_line = outcome.lines.get(&issue.line).map(String::as_str);
        print_issue(issue, source_line, writer, max_line_width);
    }
}

/// Print a success message when no problems are found.
pub fn print_success_to<W: Write>(locale_files: usize, ignored: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}{}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} locale {} - no problems found",
            locale_files,
            if locale_files == 1 { "file" } else { "files" }
        )
        .green(),
        ignored_suffix(ignored)
    );
}

fn print_json_to<W: Write>(summary: &ValidateSummary, writer: &mut W) {
    match serde_json::to_string_pretty(&summary.locales) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}

fn print_issue<W: Write>(
    issue: &Issue,
    source_line: Option<&str>,
    writer: &mut W,
    max_line_width: usize,
) {
    let severity_str = match issue.level {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message,
        issue.issue_type.to_string().dimmed().cyan()
    );

    let file = issue.file.as_deref().unwrap_or(&issue.locale);
    let location = match (issue.line, issue.column) {
        (0, _) => file.to_string(),
        (line, 0) => format!("{}:{}", file, line),
        (line, col) => format!("{}:{}:{}", file, line, col),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(source_line) = source_line {
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
            issue.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Column 0 points at the whole line.
        if issue.column > 0 {
            let caret_char = match issue.level {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let prefix: String = source_line.chars().take(issue.column - 1).collect();
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
    }

    if let Some(key) = &issue.key {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "key:".bold(),
            key,
            width = max_line_width
        );
    }
    if issue.target.is_none()
        && let Some(source) = &issue.source
    {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "source:".bold(),
            source.dimmed(),
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn summary_line(totals: &Totals) -> String {
    let line = format!(
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK,
        totals.problems(),
        totals.errors,
        if totals.errors == 1 { "error" } else { "errors" },
        totals.warnings,
        if totals.warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
    );
    let line = if totals.errors > 0 {
        line.red()
    } else {
        line.yellow()
    };
    format!("{}{}", line, ignored_suffix(totals.ignored))
}

fn ignored_suffix(ignored: usize) -> String {
    if ignored == 0 {
        String::new()
    } else {
        format!(" - {} ignored", ignored).dimmed().to_string()
    }
}

// ============================================================
// Other commands
// ============================================================

fn print_missing_to<W: Write>(summary: &PrintMissingSummary, writer: &mut W) {
    match serde_json::to_string_pretty(&summary.files) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}

pub fn print_edit_to<W: Write>(kind: CommandKind, summary: &EditSummary, writer: &mut W) {
    let stats = &summary.stats;
    if kind == CommandKind::Format {
        let _ = writeln!(writer, "Formatting: {}", summary.locales.join(", "));
    }

    for change in &stats.changes {
        let path = change.path.display();
        match kind {
            CommandKind::AddMissing | CommandKind::RemoveExtraneous => {
                if change.keys.is_empty() && change.skipped.is_empty() {
                    continue;
                }
                let verb = if kind == CommandKind::AddMissing {
                    "Added:"
                } else {
                    "Removed:"
                };
                let _ = writeln!(writer, "{}", path.to_string().underline());
                for key in &change.keys {
                    let _ = writeln!(writer, "{} {}", verb, key);
                }
                for key in &change.skipped {
                    let _ = writeln!(
                        writer,
                        "{} {} (no enclosing object)",
                        "Skipped:".yellow(),
                        key
                    );
                }
            }
            CommandKind::Sort => {
                if change.modified {
                    let _ = writeln!(writer, "{} {} - Sorted", SUCCESS_MARK.green(), path);
                }
                for object in &change.skipped {
                    let object = if object.is_empty() { "top level" } else { object };
                    let _ = writeln!(
                        writer,
                        "{} {} - could not sort \"{}\": records share lines or are mixed with other entries",
                        "warning:".bold().yellow(),
                        path,
                        object
                    );
                }
            }
            CommandKind::Rename => {
                if change.modified {
                    let _ = writeln!(writer, "{} {} - Renamed", SUCCESS_MARK.green(), path);
                } else if !change.skipped.is_empty() {
                    let _ = writeln!(writer, "{} {} - Missing", FAILURE_MARK.red(), path);
                }
            }
            _ => {}
        }
    }

    let count = stats.changes_applied;
    let line = match kind {
        CommandKind::AddMissing => format!("Added {} missing messages", count),
        CommandKind::RemoveExtraneous => format!("Removed {} extraneous messages", count),
        CommandKind::Sort => format!(
            "Sorted {} {}",
            stats.files_modified,
            if stats.files_modified == 1 { "file" } else { "files" }
        ),
        CommandKind::Rename => format!("Renamed {} messages", count),
        CommandKind::Format => format!("Formatted {} messages", count),
        _ => return,
    };
    let _ = writeln!(writer, "\n{} {}", SUCCESS_MARK.green(), line);
    if stats.skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read and were left unchanged",
            "warning:".bold().yellow(),
            stats.skipped
        );
    }
}

fn print_highlight_to<W: Write>(summary: &HighlightSummary, writer: &mut W) {
    for message in &summary.messages {
        let _ = writeln!(writer, "{}", message.file.underline());
        match &message.value {
            Some(value) => {
                let _ = writeln!(writer, "{}\n", highlight(value, &message.structure));
            }
            None => {
                let _ = writeln!(
                    writer,
                    "{} \"{}\" is missing\n",
                    FAILURE_MARK.red(),
                    summary.key
                );
            }
        }
    }
}

/// `value` with structure in red and whitespace made visible.
pub fn highlight(value: &str, structure: &[std::ops::Range<usize>]) -> String {
    let mut out = String::with_capacity(value.len() * 2);
    let mut last = 0;
    for range in structure {
        out.push_str(&visible_whitespace(&value[last..range.start]));
        out.push_str(&visible_whitespace(&value[range.clone()]).red().to_string());
        last = range.end;
    }
    out.push_str(&visible_whitespace(&value[last..]));
    out
}

fn visible_whitespace(text: &str) -> String {
    text.replace(' ', "\u{b7}")
        .replace('\t', "\u{b7}\u{b7}")
        .replace('\n', "\u{2424}\n")
}

use std::{collections::BTreeMap, ops::Range, path::PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::{actions::ActionStats, exit_status::ExitStatus};
use crate::core::data::LocaleResource;
use crate::issues::{Issue, IssueType, Totals};
use crate::rules::LocaleReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Validate,
    PrintMissing,
    AddMissing,
    RemoveExtraneous,
    Sort,
    Rename,
    Format,
    Highlight,
}

#[derive(Debug)]
pub enum CommandSummary {
    Validate(ValidateSummary),
    PrintMissing(PrintMissingSummary),
    Edit(EditSummary),
    Highlight(HighlightSummary),
}

/// Issues of one locale file after applying `ignore`.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleOutcome {
    pub locale: String,
    pub file: String,
    pub issues: Vec<Issue>,
    pub totals: Totals,
    /// File lines the issues point at, by 1-based line number.
    #[serde(skip)]
    pub lines: BTreeMap<usize, String>,
}

impl LocaleOutcome {
    pub fn new(report: LocaleReport, ignored: &[IssueType], resource: &LocaleResource) -> Self {
        let mut totals = Totals::default();
        let mut issues = Vec::with_capacity(report.issues.len());
        for issue in report.issues {
            if ignored.contains(&issue.issue_type) {
                totals.ignored += 1;
            } else {
                totals.record(&issue);
                issues.push(issue);
            }
        }
        issues.sort_by_key(|issue| (issue.line, issue.column));

        let file_lines: Vec<&str> = resource.contents.lines().collect();
        let lines = issues
            .iter()
            .filter(|issue| issue.line > 0)
            .filter_map(|issue| {
                let text = file_lines.get(issue.line - 1)?;
                Some((issue.line, text.trim_end_matches('\r').to_string()))
            })
            .collect();

        Self {
            locale: report.locale,
            file: report.file,
            issues,
            totals,
            lines,
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidateSummary {
    /// Locale directories, as shown in the final total.
    pub dirs: Vec<PathBuf>,
    pub locales: Vec<LocaleOutcome>,
}

/// Source text of missing or untranslated messages, by file then key.
#[derive(Debug, Default)]
pub struct PrintMissingSummary {
    pub files: Map<String, Value>,
}

#[derive(Debug)]
pub struct EditSummary {
    /// Locales the command ran on.
    pub locales: Vec<String>,
    pub stats: ActionStats,
}

#[derive(Debug)]
pub struct HighlightSummary {
    pub key: String,
    pub messages: Vec<HighlightedMessage>,
}

#[derive(Debug)]
pub struct HighlightedMessage {
    pub file: String,
    /// `None` when the file lacks the key.
    pub value: Option<String>,
    pub structure: Vec<Range<usize>>,
}

/// Result of running mfv commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    /// Unignored issue counts. Zero for commands that do not validate.
    pub totals: Totals,
    /// If true, exit code 1 is returned when there are unignored errors.
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.totals.errors > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::Severity;

    fn issue(issue_type: IssueType, line: usize) -> Issue {
        Issue {
            locale: "fr".to_string(),
            key: Some("a".to_string()),
            file: Some("locales/fr.json".to_string()),
            line,
            column: 0,
            level: Severity::Error,
            issue_type,
            message: "msg".to_string(),
            target: None,
            source: None,
        }
    }

    #[test]
    fn test_outcome_counts_ignored_issues() {
        let mut resource = LocaleResource::new("fr", "locales/fr.json");
        resource.contents = "{\n  \"a\": \"Ah\"\r\n}".to_string();
        let report = LocaleReport {
            locale: "fr".to_string(),
            file: "locales/fr.json".to_string(),
            issues: vec![
                issue(IssueType::Argument, 2),
                issue(IssueType::Missing, 1),
                issue(IssueType::Untranslated, 2),
            ],
        };

        let outcome = LocaleOutcome::new(report, &[IssueType::Untranslated], &resource);
        assert_eq!(outcome.totals.errors, 2);
        assert_eq!(outcome.totals.ignored, 1);
        assert_eq!(outcome.issues[0].issue_type, IssueType::Missing);
        assert_eq!(outcome.lines.get(&2).map(String::as_str), Some("  \"a\": \"Ah\""));
    }

    #[test]
    fn test_exit_status_follows_errors() {
        let mut result = CommandResult {
            kind: CommandKind::Validate,
            summary: CommandSummary::Validate(ValidateSummary::default()),
            totals: Totals::default(),
            exit_on_errors: true,
        };
        assert_eq!(result.exit_status(), ExitStatus::Success);

        result.totals.errors = 1;
        assert_eq!(result.exit_status(), ExitStatus::Failure);

        result.exit_on_errors = false;
        assert_eq!(result.exit_status(), ExitStatus::Success);
    }
}

//! Issue sink used by the rule functions.
//!
//! Rules report positions relative to the message text. The reporter turns
//! them into file line/column pairs when a resource file is attached, so the
//! rules never see the file layout.

use crate::{
    core::{data::LocaleResource, parsers::escape::raw_offset},
    issues::{Issue, IssueType, Severity},
    utils::{build_line_index, char_count_before, offset_to_line},
};

/// Where an issue points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Byte offset in the message value.
    Message(usize),
    /// Line of the record, whole line.
    Record,
    /// Start of the file.
    Top,
    /// Explicit file position (1-based line and column).
    File { line: usize, column: usize },
}

/// Message texts the issue is about.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext<'a> {
    pub key: Option<&'a str>,
    pub target: Option<&'a str>,
    pub source: Option<&'a str>,
}

pub struct Reporter<'a> {
    locale: String,
    resource: Option<&'a LocaleResource>,
    line_index: Vec<usize>,
    issues: Vec<Issue>,
}

impl<'a> Reporter<'a> {
    /// Reporter for messages that do not come from a file.
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            resource: None,
            line_index: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn for_resource(resource: &'a LocaleResource) -> Self {
        Self {
            locale: resource.locale.clone(),
            resource: Some(resource),
            line_index: build_line_index(&resource.contents),
            issues: Vec::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn error(
        &mut self,
        issue_type: IssueType,
        ctx: &KeyContext<'_>,
        message: impl Into<String>,
        position: Position,
    ) {
        self.push(Severity::Error, issue_type, ctx, message.into(), position);
    }

    pub fn warning(
        &mut self,
        issue_type: IssueType,
        ctx: &KeyContext<'_>,
        message: impl Into<String>,
        position: Position,
    ) {
        self.push(Severity::Warning, issue_type, ctx, message.into(), position);
    }

    fn push(
        &mut self,
        level: Severity,
        issue_type: IssueType,
        ctx: &KeyContext<'_>,
        message: String,
        position: Position,
    ) {
        let (line, column) = self.locate(ctx, position);
        self.issues.push(Issue {
            locale: self.locale.clone(),
            key: ctx.key.map(str::to_string),
            file: self.resource.map(LocaleResource::display_path),
            line,
            column,
            level,
            issue_type,
            message,
            target: ctx.target.map(str::to_string),
            source: ctx.source.map(str::to_string),
        });
    }

    fn locate(&self, ctx: &KeyContext<'_>, position: Position) -> (usize, usize) {
        let Some(resource) = self.resource else {
            return match position {
                Position::Message(offset) => {
                    (0, char_count_before(ctx.target.unwrap_or_default(), offset))
                }
                Position::File { line, column } => (line, column),
                Position::Record | Position::Top => (0, 0),
            };
        };

        let record = ctx.key.and_then(|key| resource.get(key));
        match (position, record) {
            (Position::File { line, column }, _) => (line, column),
            (Position::Message(offset), Some(record)) => {
                let file_offset = record.value_span.start + raw_offset(&record.raw_value, offset);
                self.file_position(&resource.contents, file_offset)
            }
            (Position::Record, Some(record)) => (record.line, 0),
            _ => (1, 0),
        }
    }

    fn file_position(&self, contents: &str, offset: usize) -> (usize, usize) {
        let line = offset_to_line(&self.line_index, offset).max(1);
        let line_start = self.line_index[line - 1];
        let column = char_count_before(&contents[line_start..], offset - line_start) + 1;
        (line, column)
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::{ScanOptions, scan_resource};

    fn resource(contents: &str) -> LocaleResource {
        let scanned = scan_resource(contents, &ScanOptions::default()).unwrap();
        let mut resource = LocaleResource::new("fr", "locales/fr.json");
        resource.contents = contents.to_string();
        resource.messages = scanned.messages;
        resource
    }

    fn ctx<'a>(key: &'a str, target: &'a str) -> KeyContext<'a> {
        KeyContext {
            key: Some(key),
            target: Some(target),
            source: None,
        }
    }

    #[test]
    fn test_message_offset_without_file_counts_chars() {
        let mut reporter = Reporter::new("fr");
        reporter.error(
            IssueType::Nbsp,
            &ctx("a", "é {x}"),
            "msg",
            Position::Message(3),
        );
        let issue = &reporter.issues()[0];
        assert_eq!((issue.line, issue.column), (0, 2));
        assert_eq!(issue.file, None);
    }

    #[test]
    fn test_message_offset_maps_to_file_column() {
        let contents = "{\n  \"a\": \"x\\\"{y}\"\n}\n";
        let resource = resource(contents);
        let mut reporter = Reporter::for_resource(&resource);
        // `{` is byte 2 of the decoded value `x"{y}`.
        reporter.error(
            IssueType::Argument,
            &ctx("a", "x\"{y}"),
            "msg",
            Position::Message(2),
        );
        let issue = &reporter.issues()[0];
        assert_eq!(issue.line, 2);
        assert_eq!(issue.column, contents.lines().nth(1).unwrap().find('{').unwrap() + 1);
        assert_eq!(issue.file.as_deref(), Some("locales/fr.json"));
    }

    #[test]
    fn test_record_and_top_positions() {
        let resource = resource("{\n  \"a\": \"x\",\n  \"b\": \"y\"\n}\n");
        let mut reporter = Reporter::for_resource(&resource);
        reporter.error(IssueType::Extraneous, &ctx("b", "y"), "msg", Position::Record);
        reporter.error(IssueType::Missing, &ctx("c", "z"), "msg", Position::Top);
        let positions: Vec<_> = reporter
            .into_issues()
            .iter()
            .map(|issue| (issue.line, issue.column))
            .collect();
        assert_eq!(positions, vec![(3, 0), (1, 0)]);
    }

    #[test]
    fn test_message_offset_for_unknown_key_falls_back_to_top() {
        let resource = resource("{\n  \"a\": \"x {y}\"\n}\n");
        let mut reporter = Reporter::for_resource(&resource);
        reporter.error(IssueType::Argument, &ctx("b", "x {y}"), "msg", Position::Message(2));
        reporter.error(IssueType::Argument, &ctx("a", "x {y}"), "msg", Position::Record);
        let positions: Vec<_> = reporter
            .into_issues()
            .iter()
            .map(|issue| (issue.line, issue.column))
            .collect();
        assert_eq!(positions, vec![(1, 0), (2, 0)]);
    }
}

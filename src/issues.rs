//! Issue types produced by the validator.
//!
//! Every issue is self-contained: the reporter and the JSON output need no
//! other state to display it.

use std::{collections::BTreeMap, fmt, ops::AddAssign, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};

// ============================================================
// Severity and IssueType
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Machine-readable issue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueType {
    Extraneous,
    Missing,
    DuplicateKeys,
    Parse,
    Brace,
    Newline,
    Nbsp,
    Argument,
    Case,
    Other,
    Categories,
    PluralKey,
    NestOrder,
    NestIdeal,
    Split,
    Untranslated,
    SourceError,
    JsonParse,
    JsonParseFatal,
}

impl IssueType {
    pub const ALL: &'static [IssueType] = &[
        IssueType::Extraneous,
        IssueType::Missing,
        IssueType::DuplicateKeys,
        IssueType::Parse,
        IssueType::Brace,
        IssueType::Newline,
        IssueType::Nbsp,
        IssueType::Argument,
        IssueType::Case,
        IssueType::Other,
        IssueType::Categories,
        IssueType::PluralKey,
        IssueType::NestOrder,
        IssueType::NestIdeal,
        IssueType::Split,
        IssueType::Untranslated,
        IssueType::SourceError,
        IssueType::JsonParse,
        IssueType::JsonParseFatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Extraneous => "extraneous",
            IssueType::Missing => "missing",
            IssueType::DuplicateKeys => "duplicate-keys",
            IssueType::Parse => "parse",
            IssueType::Brace => "brace",
            IssueType::Newline => "newline",
            IssueType::Nbsp => "nbsp",
            IssueType::Argument => "argument",
            IssueType::Case => "case",
            IssueType::Other => "other",
            IssueType::Categories => "categories",
            IssueType::PluralKey => "plural-key",
            IssueType::NestOrder => "nest-order",
            IssueType::NestIdeal => "nest-ideal",
            IssueType::Split => "split",
            IssueType::Untranslated => "untranslated",
            IssueType::SourceError => "source-error",
            IssueType::JsonParse => "json-parse",
            IssueType::JsonParseFatal => "json-parse-fatal",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "option" {
            return Ok(IssueType::Case);
        }
        IssueType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown issue type \"{}\"", s))
    }
}

impl Serialize for IssueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================
// Issue
// ============================================================

/// A positioned validator finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Resource file the issue points into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 1-based, or 0 when there is no file.
    pub line: usize,
    /// 1-based column in the file line, or 0 for the whole line.
    pub column: usize,
    pub level: Severity,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.level == Severity::Error
    }
}

// ============================================================
// Totals
// ============================================================

/// Counters for a locale or a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub errors: usize,
    pub warnings: usize,
    pub ignored: usize,
    /// Unignored issues per level and type.
    pub by_type: BTreeMap<Severity, BTreeMap<IssueType, usize>>,
}

impl Totals {
    pub fn record(&mut self, issue: &Issue) {
        match issue.level {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        *self
            .by_type
            .entry(issue.level)
            .or_default()
            .entry(issue.issue_type)
            .or_default() += 1;
    }

    pub fn problems(&self) -> usize {
        self.errors + self.warnings
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.ignored += other.ignored;
        for (level, counts) in other.by_type {
            let entry = self.by_type.entry(level).or_default();
            for (issue_type, count) in counts {
                *entry.entry(issue_type).or_default() += count;
            }
        }
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use crate::issues::*;

    fn issue(issue_type: IssueType, level: Severity) -> Issue {
        Issue {
            locale: "fr".to_string(),
            key: Some("a".to_string()),
            file: None,
            line: 0,
            column: 0,
            level,
            issue_type,
            message: "msg".to_string(),
            target: None,
            source: None,
        }
    }

    #[test]
    fn test_issue_type_round_trips_through_str() {
        for issue_type in IssueType::ALL {
            assert_eq!(issue_type.as_str().parse::<IssueType>().unwrap(), *issue_type);
        }
        assert_eq!("option".parse::<IssueType>().unwrap(), IssueType::Case);
        assert!("bogus".parse::<IssueType>().is_err());
    }

    #[test]
    fn test_issue_serializes_type_name() {
        let json = serde_json::to_value(issue(IssueType::NestOrder, Severity::Warning)).unwrap();
        assert_eq!(json["type"], "nest-order");
        assert_eq!(json["level"], "warning");
        assert!(json.get("file").is_none());
    }

    #[test]
    fn test_totals() {
        let mut totals = Totals::default();
        totals.record(&issue(IssueType::Argument, Severity::Error));
        totals.record(&issue(IssueType::Untranslated, Severity::Warning));

        let mut other = Totals::default();
        other.record(&issue(IssueType::Argument, Severity::Error));
        other.ignored = 2;
        totals += other;

        assert_eq!(totals.errors, 2);
        assert_eq!(totals.warnings, 1);
        assert_eq!(totals.ignored, 2);
        assert_eq!(totals.problems(), 3);
        assert_eq!(totals.by_type[&Severity::Error][&IssueType::Argument], 2);
    }
}

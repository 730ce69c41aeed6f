//! Validation rules for mfv.
//!
//! Each rule is a function over the inputs it needs that writes into a
//! [`Reporter`]. [`validate_message`] runs them for one key in a fixed order,
//! so the issue list for a key is stable:
//!
//! ```text
//! duplicate-keys → target parse (plural-key | brace | nbsp | parse)
//!   → source parse (source-error) → argument → newline → nbsp → case | nest-order
//!   → other → categories → untranslated → nest-ideal → split
//! ```
//!
//! `extraneous` and `missing` are decided per locale by [`validate_resource`].
//!
//! ## Module Structure
//!
//! - `reporter`: positions and the issue sink
//! - `syntax`: parse failures, arguments, newline, nbsp, cases, `other`
//! - `categories`: plural categories against the target locale
//! - `untranslated`: identical source and target text
//! - `style`: nest-ideal and split warnings

pub mod categories;
pub mod reporter;
pub mod style;
pub mod syntax;
pub mod untranslated;

use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::{
    core::{
        case_map::CaseMap,
        data::{LocaleResource, LocaleResources, MessageOptions},
    },
    issues::{Issue, IssueType},
};

pub use reporter::{KeyContext, Position, Reporter};
pub use untranslated::source_hash;

/// Validator settings shared by every locale.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions<'a> {
    pub source_locale: &'a str,
    /// Parse target plural keys against the target locale's categories.
    pub strict_plural_keys: bool,
}

/// One target message with its source counterpart.
#[derive(Debug, Clone, Copy)]
pub struct MessagePair<'a> {
    pub key: &'a str,
    pub target: &'a str,
    pub source: &'a str,
    pub options: &'a MessageOptions,
}

/// Issues of one locale file.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: String,
    pub file: String,
    pub issues: Vec<Issue>,
}

/// Run the per-key checks for one message.
pub fn check_message(
    pair: &MessagePair<'_>,
    target_locale: &str,
    options: &ValidateOptions<'_>,
    reporter: &mut Reporter<'_>,
) {
    let ctx = KeyContext {
        key: Some(pair.key),
        target: Some(pair.target),
        source: Some(pair.source),
    };

    let plural_locale = options.strict_plural_keys.then_some(target_locale);
    let Some(target_nodes) =
        syntax::check_target_parse(pair.target, plural_locale, &ctx, reporter)
    else {
        return;
    };
    let Some(source_nodes) = syntax::check_source_parse(pair.source, &ctx, reporter) else {
        return;
    };

    let target_map = CaseMap::build(&target_nodes);
    let source_map = CaseMap::build(&source_nodes);

    syntax::check_arguments(&target_map, &source_map, &ctx, reporter);
    syntax::check_newline(pair.target, &target_nodes, &ctx, reporter);
    syntax::check_nbsp(pair.target, &target_nodes, &ctx, reporter);
    syntax::check_cases(&target_map, &source_map, &ctx, reporter);
    syntax::check_other(&target_nodes, &ctx, reporter);
    categories::check_categories(&target_nodes, target_locale, &ctx, reporter);
    untranslated::check_untranslated(
        &untranslated::UntranslatedInput {
            target: pair.target,
            source: pair.source,
            target_locale,
            source_locale: options.source_locale,
            options: pair.options,
        },
        &ctx,
        reporter,
    );
    style::check_nest_ideal(&target_map, &ctx, reporter);
    if target_locale.eq_ignore_ascii_case(options.source_locale) {
        style::check_split(&target_nodes, &ctx, reporter);
    }
}

/// Validate a single message that does not come from a resource file.
///
/// Columns are character offsets into `target`.
pub fn validate_message(
    key: &str,
    target: &str,
    source: &str,
    target_locale: &str,
    options: &ValidateOptions<'_>,
) -> Vec<Issue> {
    let mut reporter = Reporter::new(target_locale);
    let message_options = MessageOptions::default();
    let pair = MessagePair {
        key,
        target,
        source,
        options: &message_options,
    };
    check_message(&pair, target_locale, options, &mut reporter);
    reporter.into_issues()
}

/// Validate every record of `target` against `source`.
///
/// A panic while checking one key becomes a `parse` error for that key.
pub fn validate_resource(
    target: &LocaleResource,
    source: &LocaleResource,
    options: &ValidateOptions<'_>,
) -> LocaleReport {
    let mut reporter = Reporter::for_resource(target);
    let file_ctx = KeyContext::default();

    if let Some(err) = &target.scan_error {
        let (line, column) = file_position(&target.contents, err.offset);
        reporter.error(
            IssueType::JsonParseFatal,
            &file_ctx,
            err.message.clone(),
            Position::File { line, column },
        );
        return finish(target, reporter);
    }
    // Nothing to compare against; the source's own report carries the error.
    if source.scan_error.is_some() {
        return finish(target, reporter);
    }
    if let Some(err) = &target.json_error {
        reporter.error(
            IssueType::JsonParse,
            &file_ctx,
            err.message.clone(),
            Position::File {
                line: err.line,
                column: err.column,
            },
        );
    }

    for (key, record) in &target.messages {
        let Some(source_record) = source.get(key) else {
            let ctx = KeyContext {
                key: Some(key),
                target: Some(&record.value),
                source: None,
            };
            reporter.error(
                IssueType::Extraneous,
                &ctx,
                "This string does not exist in the source file.",
                Position::Record,
            );
            continue;
        };

        let ctx = KeyContext {
            key: Some(key),
            target: Some(&record.value),
            source: Some(&source_record.value),
        };
        if target.duplicate_keys.contains(key) {
            reporter.error(
                IssueType::DuplicateKeys,
                &ctx,
                "Key is defined more than once in the locale file.",
                Position::Record,
            );
        }

        let pair = MessagePair {
            key,
            target: &record.value,
            source: &source_record.value,
            options: &record.options,
        };
        let checked = catch_unwind(AssertUnwindSafe(|| {
            check_message(&pair, &target.locale, options, &mut reporter)
        }));
        if checked.is_err() {
            reporter.error(
                IssueType::Parse,
                &ctx,
                "Internal error while validating this string.",
                Position::Record,
            );
        }
    }

    for (key, source_record) in &source.messages {
        if target.contains_key(key) {
            continue;
        }
        let ctx = KeyContext {
            key: Some(key),
            target: None,
            source: Some(&source_record.value),
        };
        reporter.error(
            IssueType::Missing,
            &ctx,
            "String missing from locale file.",
            Position::Top,
        );
    }

    finish(target, reporter)
}

fn finish(target: &LocaleResource, reporter: Reporter<'_>) -> LocaleReport {
    LocaleReport {
        locale: target.locale.clone(),
        file: target.display_path(),
        issues: reporter.into_issues(),
    }
}

fn file_position(contents: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(contents.len());
    let before = contents.get(..offset).unwrap_or(contents);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}

/// Find the source resource, matching the locale code case-insensitively.
pub fn find_source<'r>(
    resources: &'r LocaleResources,
    source_locale: &str,
) -> Option<&'r LocaleResource> {
    resources
        .values()
        .find(|resource| resource.locale.eq_ignore_ascii_case(source_locale))
}

/// Validate every locale of a directory, the source locale included.
///
/// Locales are checked in parallel; reports are sorted by locale code.
pub fn validate_locales(
    resources: &LocaleResources,
    options: &ValidateOptions<'_>,
) -> Result<Vec<LocaleReport>> {
    let Some(source) = find_source(resources, options.source_locale) else {
        bail!(
            "Source locale \"{}\" has no resource file.\n\
             Hint: Check the 'sourceLocale' setting in .mfvrc.json.",
            options.source_locale
        );
    };

    let mut reports: Vec<LocaleReport> = resources
        .par_iter()
        .map(|(_, target)| validate_resource(target, source, options))
        .collect();
    reports.sort_by(|a, b| a.locale.cmp(&b.locale));
    Ok(reports)
}

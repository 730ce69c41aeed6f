//! Structural checks: parsing, arguments, stray newlines, non-breaking
//! spaces, select cases and the mandatory `other` option.

use std::ops::Range;

use crate::{
    core::{
        case_map::{CaseEntry, CaseMap},
        icu::{Node, ParseError, ParseErrorKind, ParseOptions, parse, parse_with},
        structure::{count_braces, find_structural_nbsp, structure_spans},
    },
    issues::IssueType,
    rules::reporter::{KeyContext, Position, Reporter},
    utils::char_count_before,
};

/// Parse the target message, reporting why it failed.
///
/// A failure is classified as `plural-key`, `brace`, `nbsp` or `parse`, in
/// that order of precedence.
pub fn check_target_parse(
    target: &str,
    plural_locale: Option<&str>,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) -> Option<Vec<Node>> {
    let options = ParseOptions {
        require_other_clause: false,
        plural_locale,
    };
    match parse_with(target, &options) {
        Ok(nodes) => Some(nodes),
        Err(err) => {
            report_parse_error(target, &err, ctx, reporter);
            None
        }
    }
}

fn report_parse_error(
    target: &str,
    err: &ParseError,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    let position = Position::Message(err.offset);
    if matches!(err.kind, ParseErrorKind::InvalidPluralKey { .. }) {
        reporter.error(IssueType::PluralKey, ctx, err.message.clone(), position);
        return;
    }

    let (open, close) = count_braces(target);
    if open != close {
        reporter.error(
            IssueType::Brace,
            ctx,
            format!("Mismatched braces (i.e. {{}}). {}", err.message),
            position,
        );
    } else if let Some(offset) = find_structural_nbsp(target) {
        reporter.error(IssueType::Nbsp, ctx, nbsp_message(target, offset), Position::Message(offset));
    } else {
        reporter.error(IssueType::Parse, ctx, err.message.clone(), position);
    }
}

/// Parse the source message; a failure is the source's fault, not the target's.
pub fn check_source_parse(
    source: &str,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) -> Option<Vec<Node>> {
    match parse(source) {
        Ok(nodes) => Some(nodes),
        Err(_) => {
            reporter.error(
                IssueType::SourceError,
                ctx,
                "Failed to parse source string.",
                Position::Message(0),
            );
            None
        }
    }
}

/// JSON array of strings, as shown in issue messages.
fn json_list<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&items).unwrap_or_default()
}

/// Target argument names that the source does not know.
pub fn check_arguments(
    target: &CaseMap,
    source: &CaseMap,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    let unknown = target.unrecognized_arguments(source);
    let Some((_, first_span)) = unknown.first() else {
        return;
    };
    let names: Vec<&str> = unknown.iter().map(|(name, _)| *name).collect();
    let offset = first_span.map(|span| span.start).unwrap_or(0);
    reporter.error(
        IssueType::Argument,
        ctx,
        format!("Unrecognized arguments {}", json_list(&names)),
        Position::Message(offset),
    );
}

fn nbsp_message(target: &str, offset: usize) -> String {
    format!(
        "String contains invalid non-breaking space at position {}.",
        char_count_before(target, offset)
    )
}

fn collect_literal_spans(nodes: &[Node], spans: &mut Vec<Range<usize>>) {
    for node in nodes {
        match node {
            Node::Literal(literal) => {
                if let Some(span) = literal.span {
                    spans.push(span.start..span.end);
                }
            }
            Node::Select(select) => {
                for option in select.options.values() {
                    collect_literal_spans(&option.value, spans);
                }
            }
            Node::Plural(plural) => {
                for option in plural.options.values() {
                    collect_literal_spans(&option.value, spans);
                }
            }
            Node::Tag(tag) => collect_literal_spans(&tag.children, spans),
            _ => {}
        }
    }
}

/// First line break in the message structure, outside translatable text.
pub fn check_newline(
    target: &str,
    nodes: &[Node],
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    let mut literal_spans = Vec::new();
    collect_literal_spans(nodes, &mut literal_spans);

    let found = structure_spans(target).into_iter().find_map(|span| {
        target[span.clone()]
            .match_indices('\n')
            .map(|(idx, _)| span.start + idx)
            .find(|offset| !literal_spans.iter().any(|literal| literal.contains(offset)))
    });
    if let Some(offset) = found {
        reporter.warning(
            IssueType::Newline,
            ctx,
            "String contains unnecessary newline(s).",
            Position::Message(offset),
        );
    }
}

/// First no-break space outside translatable text.
pub fn check_nbsp(
    target: &str,
    nodes: &[Node],
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    let mut literal_spans = Vec::new();
    collect_literal_spans(nodes, &mut literal_spans);

    let found = target.char_indices().find(|(idx, c)| {
        *c == '\u{a0}' && !literal_spans.iter().any(|span| span.contains(idx))
    });
    if let Some((offset, _)) = found {
        reporter.error(IssueType::Nbsp, ctx, nbsp_message(target, offset), Position::Message(offset));
    }
}

/// Option keys the source does not have, or a nesting order mismatch.
pub fn check_cases(
    target: &CaseMap,
    source: &CaseMap,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    if target.cases == source.cases {
        return;
    }
    let unknown = target.unrecognized_cases(source);
    if !unknown.is_empty() {
        let labels: Vec<&str> = unknown.iter().map(|entry| CaseEntry::label(entry)).collect();
        reporter.error(
            IssueType::Case,
            ctx,
            format!("Unrecognized cases {}", json_list(&labels)),
            Position::Message(0),
        );
    } else if target.cases.len() == source.cases.len() {
        reporter.warning(
            IssueType::NestOrder,
            ctx,
            "Nesting order does not match source.",
            Position::Message(0),
        );
    }
}

/// Every select and plural, however deeply nested, needs an `other` option.
pub fn check_other(nodes: &[Node], ctx: &KeyContext<'_>, reporter: &mut Reporter<'_>) {
    for node in nodes {
        let options = match node {
            Node::Select(select) => &select.options,
            Node::Plural(plural) => &plural.options,
            Node::Tag(tag) => {
                check_other(&tag.children, ctx, reporter);
                continue;
            }
            _ => continue,
        };
        if !options.keys().any(|key| key.trim() == "other") {
            let offset = node.span().map(|span| span.start).unwrap_or(0);
            reporter.error(
                IssueType::Other,
                ctx,
                "Missing \"other\" case",
                Position::Message(offset),
            );
        }
        for option in options.values() {
            check_other(&option.value, ctx, reporter);
        }
    }
}

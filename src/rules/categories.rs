//! Plural categories used by a message versus those of the target locale.
//!
//! Plurals nested inside a select are skipped: their options are often
//! intentionally reduced per select branch.

use crate::{
    core::{icu::Node, plurals::categories_for},
    issues::IssueType,
    rules::reporter::{KeyContext, Position, Reporter},
    utils::format_quoted_list,
};

pub fn check_categories(
    nodes: &[Node],
    locale: &str,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    visit(nodes, locale, false, ctx, reporter);
}

fn visit(
    nodes: &[Node],
    locale: &str,
    in_select: bool,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    for node in nodes {
        match node {
            Node::Select(select) => {
                for option in select.options.values() {
                    visit(&option.value, locale, true, ctx, reporter);
                }
            }
            Node::Plural(plural) => {
                if !in_select {
                    let legal = categories_for(locale, plural.plural_type);
                    let mut used = Vec::new();
                    for (key, option) in &plural.options {
                        if key.starts_with('=') {
                            continue;
                        }
                        if legal.contains(&key.as_str()) {
                            used.push(key.as_str());
                            continue;
                        }
                        let offset = option
                            .key_span
                            .or(plural.span)
                            .map(|span| span.start)
                            .unwrap_or(0);
                        reporter.error(
                            IssueType::Categories,
                            ctx,
                            format!(
                                "Invalid category \"{}\". Categories for \"{}\" are {}.",
                                key,
                                locale,
                                format_quoted_list(legal)
                            ),
                            Position::Message(offset),
                        );
                    }

                    let unused: Vec<&str> = legal
                        .iter()
                        .copied()
                        .filter(|category| !used.contains(category))
                        .collect();
                    if !unused.is_empty() {
                        let offset = plural.span.map(|span| span.start).unwrap_or(0);
                        reporter.warning(
                            IssueType::Categories,
                            ctx,
                            format!(
                                "Missing categories {} for \"{}\".",
                                format_quoted_list(&unused),
                                locale
                            ),
                            Position::Message(offset),
                        );
                    }
                }
                for option in plural.options.values() {
                    visit(&option.value, locale, in_select, ctx, reporter);
                }
            }
            Node::Tag(tag) => visit(&tag.children, locale, in_select, ctx, reporter),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::icu::parse, issues::Severity};
    use pretty_assertions::assert_eq;

    fn check(target: &str, locale: &str) -> Vec<(Severity, String, usize)> {
        let mut reporter = Reporter::new(locale);
        let ctx = KeyContext {
            key: Some("key"),
            target: Some(target),
            source: None,
        };
        check_categories(&parse(target).unwrap(), locale, &ctx, &mut reporter);
        reporter
            .into_issues()
            .into_iter()
            .map(|issue| (issue.level, issue.message, issue.column))
            .collect()
    }

    #[test]
    fn test_illegal_categories_for_en_gb() {
        let target = "{a, plural, one {} two {} few {} many {} other {}}";
        let expected: Vec<_> = ["two", "few", "many"]
            .iter()
            .map(|key| {
                (
                    Severity::Error,
                    format!(
                        "Invalid category \"{}\". Categories for \"en-gb\" are \"one\" and \"other\".",
                        key
                    ),
                    target.find(&format!(" {} ", key)).unwrap() + 1,
                )
            })
            .collect();
        assert_eq!(check(target, "en-gb"), expected);
    }

    #[test]
    fn test_unused_categories_warning() {
        let issues = check("{n, plural, one {x} other {y}}", "ru");
        assert_eq!(
            issues,
            vec![(
                Severity::Warning,
                "Missing categories \"few\" and \"many\" for \"ru\".".to_string(),
                0
            )]
        );
    }

    #[test]
    fn test_exact_keys_and_nested_plurals_are_ignored() {
        assert!(check("{n, plural, =0 {none} one {x} other {y}}", "en").is_empty());
        assert!(check("{g, select, other {{n, plural, other {y}}}}", "en").is_empty());
    }

    #[test]
    fn test_ordinal_categories() {
        let issues = check("{n, selectordinal, one {#st} other {#th}}", "en");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].1,
            "Missing categories \"two\" and \"few\" for \"en\"."
        );
    }
}

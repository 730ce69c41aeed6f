//! Tree-to-tree stages of the formatter.

use std::cmp::Ordering;

use indexmap::IndexSet;

use super::printer::print_inline;
use crate::core::icu::{Node, Options, PluralNode, SelectOption};
use crate::core::plurals::{categories_for, category_rank};

/// Enclosing plural of a list: argument name and offset.
type Enclosing<'a> = Option<(&'a str, i64)>;

fn map_options(options: Options, mut f: impl FnMut(Vec<Node>) -> Vec<Node>) -> Options {
    options
        .into_iter()
        .map(|(key, option)| {
            (
                key,
                SelectOption {
                    value: f(option.value),
                    key_span: option.key_span,
                },
            )
        })
        .collect()
}

/// Concatenate adjacent literals.
pub(crate) fn merge_literals(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(Node::Literal(last)), Node::Literal(next)) = (merged.last_mut(), &node) {
            last.value.push_str(&next.value);
            last.span = None;
            continue;
        }
        merged.push(node);
    }
    merged
}

// ============================================================
// Pound expansion
// ============================================================

/// Replace `#` with `{arg}` inside plurals without an offset.
pub fn expand_hashes(nodes: Vec<Node>) -> Vec<Node> {
    expand_list(nodes, None)
}

fn expand_list(nodes: Vec<Node>, enclosing: Enclosing<'_>) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Pound(span) => match enclosing {
                Some((name, 0)) => Node::argument(name),
                _ => Node::Pound(span),
            },
            Node::Plural(mut plural) => {
                let name = plural.name.clone();
                let offset = plural.offset;
                plural.options =
                    map_options(plural.options, |value| expand_list(value, Some((&name, offset))));
                Node::Plural(plural)
            }
            Node::Select(mut select) => {
                select.options = map_options(select.options, |value| expand_list(value, None));
                Node::Select(select)
            }
            Node::Tag(mut tag) => {
                tag.children = expand_list(tag.children, enclosing);
                Node::Tag(tag)
            }
            other => other,
        })
        .collect()
}

// ============================================================
// Selector hoisting
// ============================================================

/// Move the first select/plural of every list outward so that it wraps its
/// siblings; each option receives a copy of the surrounding text.
pub fn hoist_selectors(nodes: Vec<Node>) -> Vec<Node> {
    hoist_list(nodes, None)
}

fn contains_bare_pound(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Pound(_) => true,
        Node::Tag(tag) => contains_bare_pound(&tag.children),
        _ => false,
    })
}

fn replace_pounds(nodes: Vec<Node>, name: &str) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Pound(_) => Node::argument(name),
            Node::Tag(mut tag) => {
                tag.children = replace_pounds(tag.children, name);
                Node::Tag(tag)
            }
            other => other,
        })
        .collect()
}

fn hoist_list(mut nodes: Vec<Node>, enclosing: Enclosing<'_>) -> Vec<Node> {
    let Some(idx) = nodes.iter().position(Node::is_selector) else {
        return merge_literals(nodes);
    };

    // A selector inside a tag cannot be lifted out of the tag.
    if nodes[..idx]
        .iter()
        .any(|node| matches!(node, Node::Tag(_)) && node.contains_selector())
    {
        return merge_literals(nodes);
    }

    let selector = nodes.remove(idx);
    let mut siblings = nodes;
    if contains_bare_pound(&siblings) {
        match enclosing {
            Some((name, 0)) => siblings = replace_pounds(siblings, name),
            _ => {
                siblings.insert(idx, selector);
                return merge_literals(siblings);
            }
        }
    }
    let suffix = siblings.split_off(idx);
    let prefix = siblings;

    let wrap = |value: Vec<Node>, inner: Enclosing<'_>| {
        let mut list = prefix.clone();
        list.extend(value);
        list.extend(suffix.iter().cloned());
        hoist_list(list, inner)
    };

    let hoisted = match selector {
        Node::Plural(mut plural) => {
            let name = plural.name.clone();
            let offset = plural.offset;
            plural.options = map_options(plural.options, |value| wrap(value, Some((&name, offset))));
            Node::Plural(plural)
        }
        Node::Select(mut select) => {
            select.options = map_options(select.options, |value| wrap(value, enclosing));
            Node::Select(select)
        }
        other => other,
    };

    vec![hoisted]
}

// ============================================================
// Plural categories
// ============================================================

#[derive(Debug, Clone, Copy)]
pub struct CategoryOptions<'a> {
    pub locale: &'a str,
    pub add: bool,
    pub remove: bool,
    pub dedupe: bool,
    pub rename: bool,
}

/// Repair plural categories for the locale, recursively.
pub fn normalize_plurals(nodes: Vec<Node>, options: &CategoryOptions<'_>) -> Vec<Node> {
    normalize_list(nodes, options, &IndexSet::new())
}

fn normalize_list(
    nodes: Vec<Node>,
    options: &CategoryOptions<'_>,
    swap_one: &IndexSet<String>,
) -> Vec<Node> {
    // A literal `1` next to the argument it counts is not a stand-in for it.
    let mut swap = swap_one.clone();
    for node in &nodes {
        if let Node::Argument(arg) = node {
            swap.shift_remove(&arg.name);
        }
    }

    let mut result = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Literal(literal) if !swap.is_empty() => {
                result.extend(swap_literal_ones(&literal.value, &swap));
            }
            Node::Plural(plural) => result.push(Node::Plural(normalize_plural(plural, options, &swap))),
            Node::Select(mut select) => {
                select.options =
                    map_options(select.options, |value| normalize_list(value, options, &swap));
                result.push(Node::Select(select));
            }
            Node::Tag(mut tag) => {
                tag.children = normalize_list(tag.children, options, &swap);
                result.push(Node::Tag(tag));
            }
            other => result.push(other),
        }
    }
    merge_literals(result)
}

/// Byte offsets of every `1` that is not part of a longer number.
fn standalone_ones(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(idx, b)| {
            **b == b'1'
                && (*idx == 0 || !bytes[idx - 1].is_ascii_digit())
                && bytes.get(idx + 1).is_none_or(|next| !next.is_ascii_digit())
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn swap_literal_ones(text: &str, swap: &IndexSet<String>) -> Vec<Node> {
    let name = swap.iter().cloned().collect::<Vec<_>>().join("|");
    let mut nodes = Vec::new();
    let mut last = 0;
    for idx in standalone_ones(text) {
        if idx > last {
            nodes.push(Node::literal(&text[last..idx]));
        }
        nodes.push(Node::argument(name.clone()));
        last = idx + 1;
    }
    if last < text.len() || nodes.is_empty() {
        nodes.push(Node::literal(&text[last..]));
    }
    nodes
}

fn has_literal_one(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Literal(literal) => !standalone_ones(&literal.value).is_empty(),
        Node::Select(select) => select.options.values().any(|o| has_literal_one(&o.value)),
        Node::Plural(plural) => plural.options.values().any(|o| has_literal_one(&o.value)),
        Node::Tag(tag) => has_literal_one(&tag.children),
        _ => false,
    })
}

/// Locales that keep both `one` and `=1`.
fn keeps_one_with_exact(locale: &str) -> bool {
    let lower = locale.to_ascii_lowercase();
    lower.starts_with("fr") || lower.starts_with("pt")
}

fn normalize_plural(
    mut plural: PluralNode,
    options: &CategoryOptions<'_>,
    swap_one: &IndexSet<String>,
) -> PluralNode {
    let legal = categories_for(options.locale, plural.plural_type);
    let mut cases = std::mem::take(&mut plural.options);

    if options.add {
        for category in legal {
            if cases.contains_key(*category) {
                continue;
            }
            if *category == "one" && cases.contains_key("=1") && !keeps_one_with_exact(options.locale)
            {
                continue;
            }
            let template = ["other", "many", "few"]
                .iter()
                .find_map(|k| cases.get(*k))
                .or_else(|| cases.values().last())
                .map(|option| SelectOption::new(option.value.clone()));
            if let Some(template) = template {
                cases.insert(category.to_string(), template);
            }
        }
    }

    let mut converted_one = false;
    if let (Some(one), Some(exact)) = (cases.get("one"), cases.get("=1")) {
        if print_inline(&one.value) == print_inline(&exact.value) {
            cases.shift_remove("=1");
        }
    } else if let Some(exact) = cases.get("=1")
        && has_literal_one(&exact.value)
    {
        rename_key(&mut cases, "=1", "one");
        converted_one = true;
    }

    let mut swap_with_arg = swap_one.clone();
    swap_with_arg.insert(plural.name.clone());
    cases = cases
        .into_iter()
        .map(|(key, option)| {
            let swap = if converted_one && key == "one" {
                &swap_with_arg
            } else {
                swap_one
            };
            let value = normalize_list(option.value, options, swap);
            (
                key,
                SelectOption {
                    value,
                    key_span: option.key_span,
                },
            )
        })
        .collect();

    if options.dedupe
        && let Some(other) = cases.get("other")
    {
        let other_printed = print_inline(&other.value);
        cases.retain(|key, option| key == "other" || print_inline(&option.value) != other_printed);
    }

    let is_illegal = |key: &str| !key.starts_with('=') && !legal.contains(&key);

    if options.remove {
        let illegal: Vec<String> = cases.keys().filter(|k| is_illegal(k)).cloned().collect();
        let mut last_removed = None;
        for key in illegal {
            last_removed = cases.shift_remove(&key);
        }
        if cases.is_empty()
            && let Some(option) = last_removed
        {
            cases.insert("other".to_string(), option);
        }
    }

    if options.rename {
        let unused: Vec<&str> = legal
            .iter()
            .copied()
            .filter(|category| !cases.contains_key(*category))
            .collect();
        let illegal: Vec<String> = cases.keys().filter(|k| is_illegal(k)).cloned().collect();
        if let ([category], [key]) = (unused.as_slice(), illegal.as_slice()) {
            rename_key(&mut cases, key, category);
        }
    }

    plural.options = cases;
    plural
}

/// Rename `from` to `to` in place, keeping its position.
fn rename_key(options: &mut Options, from: &str, to: &str) {
    if let Some(idx) = options.get_index_of(from)
        && let Some((_, option)) = options.shift_remove_index(idx)
    {
        options.shift_insert(idx, to.to_string(), option);
    }
}

// ============================================================
// Sorting
// ============================================================

fn compare_plural_keys(a: &str, b: &str) -> Ordering {
    fn group(key: &str) -> (u8, usize) {
        if key.starts_with('=') {
            (0, 0)
        } else if key == "other" {
            (3, 0)
        } else {
            match category_rank(key) {
                Some(rank) => (1, rank),
                None => (2, 0),
            }
        }
    }
    match (a.starts_with('='), b.starts_with('=')) {
        (true, true) => a.cmp(b),
        _ => group(a).cmp(&group(b)),
    }
}

/// Plural keys: `=N`, then CLDR order, unknown keys, `other`.
/// Select keys keep their order with `other` last.
pub fn sort_options(nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Plural(mut plural) => {
                plural.options = map_options(plural.options, sort_options);
                plural.options.sort_by(|a, _, b, _| compare_plural_keys(a, b));
                Node::Plural(plural)
            }
            Node::Select(mut select) => {
                select.options = map_options(select.options, sort_options);
                select
                    .options
                    .sort_by(|a, _, b, _| (a == "other").cmp(&(b == "other")));
                Node::Select(select)
            }
            Node::Tag(mut tag) => {
                tag.children = sort_options(tag.children);
                Node::Tag(tag)
            }
            other => other,
        })
        .collect()
}

// ============================================================
// Trimming
// ============================================================

/// Trim the outer whitespace of every list: the first literal at its start,
/// the last one at its end.
pub fn trim_literals(nodes: Vec<Node>) -> Vec<Node> {
    let len = nodes.len();
    nodes
        .into_iter()
        .enumerate()
        .map(|(idx, node)| match node {
            Node::Literal(mut literal) => {
                literal.value = match (idx == 0, idx + 1 == len) {
                    (true, true) => literal.value.trim().to_string(),
                    (true, false) => literal.value.trim_start().to_string(),
                    (false, true) => literal.value.trim_end().to_string(),
                    (false, false) => literal.value,
                };
                Node::Literal(literal)
            }
            Node::Plural(mut plural) => {
                plural.options = map_options(plural.options, trim_literals);
                Node::Plural(plural)
            }
            Node::Select(mut select) => {
                select.options = map_options(select.options, trim_literals);
                Node::Select(select)
            }
            Node::Tag(mut tag) => {
                tag.children = trim_literals(tag.children);
                Node::Tag(tag)
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icu::parse;

    fn keys(nodes: &[Node]) -> Vec<String> {
        match &nodes[0] {
            Node::Plural(plural) => plural.options.keys().cloned().collect(),
            Node::Select(select) => select.options.keys().cloned().collect(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plural_sort_order() {
        let nodes = sort_options(
            parse("{a, plural, other {} few {} =2 {} xyz {} one {} =10 {} zero {}}").unwrap(),
        );
        assert_eq!(
            keys(&nodes),
            vec!["=10", "=2", "zero", "one", "few", "xyz", "other"]
        );
    }

    #[test]
    fn test_select_sort_keeps_order_with_other_last() {
        let nodes = sort_options(parse("{a, select, other {} b {} a {}}").unwrap());
        assert_eq!(keys(&nodes), vec!["b", "a", "other"]);
    }

    #[test]
    fn test_add_clones_other() {
        let options = CategoryOptions {
            locale: "ru",
            add: true,
            remove: false,
            dedupe: false,
            rename: false,
        };
        let nodes = normalize_plurals(parse("{a, plural, one {x} other {y}}").unwrap(), &options);
        let Node::Plural(plural) = &nodes[0] else {
            panic!("expected plural");
        };
        assert_eq!(plural.options.len(), 4);
        assert_eq!(
            print_inline(&plural.options["few"].value),
            print_inline(&plural.options["other"].value)
        );
    }

    #[test]
    fn test_add_skips_one_next_to_exact_match() {
        let options = CategoryOptions {
            locale: "en",
            add: true,
            remove: false,
            dedupe: false,
            rename: false,
        };
        let nodes = normalize_plurals(parse("{a, plural, =1 {x} other {y}}").unwrap(), &options);
        assert_eq!(keys(&nodes), vec!["=1", "other"]);

        let fr = CategoryOptions {
            locale: "fr",
            ..options
        };
        let nodes = normalize_plurals(parse("{a, plural, =1 {x} other {y}}").unwrap(), &fr);
        assert_eq!(keys(&nodes), vec!["=1", "other", "one", "many"]);
    }

    #[test]
    fn test_swap_ignores_longer_numbers() {
        assert_eq!(standalone_ones("1 of 10, 21, 1"), vec![0, 13]);
    }

    #[test]
    fn test_hoist_skips_offset_pounds() {
        let nodes =
            hoist_selectors(parse("{n, plural, offset:1 other {# and {g, select, other {x}}}}").unwrap());
        let Node::Plural(plural) = &nodes[0] else {
            panic!("expected plural");
        };
        assert!(matches!(plural.options["other"].value[0], Node::Pound(_)));
    }

    #[test]
    fn test_hoist_skips_selector_inside_tag() {
        let nodes = hoist_selectors(
            parse("<b>{a, select, other {x}}</b> {c, select, other {y}}").unwrap(),
        );
        assert_eq!(nodes.len(), 3);
    }
}

//! Serializes a message tree back to ICU syntax.

use crate::core::icu::{ArgStyle, FormattedNode, Node, Options, PluralType};

use super::transform::merge_literals;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    /// One option per line, indented with tabs.
    pub newlines: bool,
    /// Indentation of the first line's surroundings.
    pub base_level: usize,
}

pub fn print_message(nodes: &[Node], options: &PrintOptions) -> String {
    let mut printer = Printer {
        newlines: options.newlines,
        out: String::new(),
    };
    printer.print_list(nodes, options.base_level, false, true);
    printer.out
}

/// Single-line rendering used to compare subtrees.
pub fn print_inline(nodes: &[Node]) -> String {
    let mut printer = Printer {
        newlines: false,
        out: String::new(),
    };
    printer.print_list(nodes, 0, true, false);
    printer.out
}

struct Printer {
    newlines: bool,
    out: String,
}

impl Printer {
    fn newline(&mut self, level: usize) {
        if self.newlines {
            self.out.push('\n');
            self.out.extend(std::iter::repeat_n('\t', level));
        } else {
            self.out.push(' ');
        }
    }

    fn print_list(&mut self, nodes: &[Node], level: usize, pound: bool, top: bool) {
        let merged;
        let nodes = if nodes
            .windows(2)
            .any(|w| matches!(w, [Node::Literal(_), Node::Literal(_)]))
        {
            merged = merge_literals(nodes.to_vec());
            merged.as_slice()
        } else {
            nodes
        };

        for (idx, node) in nodes.iter().enumerate() {
            match node {
                Node::Literal(literal) => {
                    let followed_by_syntax = !(top && idx + 1 == nodes.len());
                    self.out
                        .push_str(&escape_literal(&literal.value, pound, followed_by_syntax));
                }
                Node::Argument(arg) => {
                    self.out.push('{');
                    self.out.push_str(&arg.name);
                    self.out.push('}');
                }
                Node::Number(node) => self.print_formatted(node, "number"),
                Node::Date(node) => self.print_formatted(node, "date"),
                Node::Time(node) => self.print_formatted(node, "time"),
                Node::Select(select) => {
                    self.out.push('{');
                    self.out.push_str(&select.name);
                    self.out.push_str(", select,");
                    self.print_options(&select.options, level, false);
                }
                Node::Plural(plural) => {
                    self.out.push('{');
                    self.out.push_str(&plural.name);
                    self.out.push_str(match plural.plural_type {
                        PluralType::Cardinal => ", plural,",
                        PluralType::Ordinal => ", selectordinal,",
                    });
                    if plural.offset != 0 {
                        self.out.push_str(&format!(" offset:{}", plural.offset));
                    }
                    self.print_options(&plural.options, level, true);
                }
                Node::Tag(tag) => {
                    self.out.push('<');
                    self.out.push_str(&tag.name);
                    self.out.push('>');
                    self.print_list(&tag.children, level + 1, pound, false);
                    self.out.push_str("</");
                    self.out.push_str(&tag.name);
                    self.out.push('>');
                }
                Node::Pound(_) => self.out.push('#'),
            }
        }
    }

    fn print_options(&mut self, options: &Options, level: usize, pound: bool) {
        for (key, option) in options {
            self.newline(level);
            if self.newlines {
                self.out.push('\t');
            }
            self.out.push_str(key);
            self.out.push_str(" {");
            self.print_list(&option.value, level + 1, pound, false);
            self.out.push('}');
        }
        if self.newlines {
            self.out.push('\n');
            self.out.extend(std::iter::repeat_n('\t', level));
        }
        self.out.push('}');
    }

    fn print_formatted(&mut self, node: &FormattedNode, keyword: &str) {
        self.out.push('{');
        self.out.push_str(&node.name);
        self.out.push_str(", ");
        self.out.push_str(keyword);
        match &node.style {
            Some(ArgStyle::Named(style)) => {
                self.out.push_str(", ");
                self.out.push_str(style);
            }
            Some(ArgStyle::Skeleton(skeleton)) => {
                self.out.push_str(", ::");
                self.out.push_str(skeleton);
            }
            None => {}
        }
        self.out.push('}');
    }
}

/// `<name/>` starting at `idx`, which the parser keeps as plain text.
fn is_self_closing_tag(chars: &[char], idx: usize) -> bool {
    let mut i = idx + 1;
    while chars
        .get(i)
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
    {
        i += 1;
    }
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    chars.get(i) == Some(&'/') && chars.get(i + 1) == Some(&'>')
}

fn is_special(chars: &[char], idx: usize, pound: bool) -> bool {
    match chars[idx] {
        '{' | '}' => true,
        '#' => pound,
        '<' => match chars.get(idx + 1) {
            Some('/') => true,
            Some(c) if c.is_alphabetic() => !is_self_closing_tag(chars, idx),
            _ => false,
        },
        _ => false,
    }
}

/// Characters that turn a preceding `'` into an escape.
fn quotable(c: char, pound: bool) -> bool {
    matches!(c, '{' | '}' | '<' | '>') || (c == '#' && pound)
}

/// Quote the syntax characters of a literal so that it parses back to itself.
///
/// Each whitespace-separated word holding syntax characters is quoted from its
/// first to its last syntax character.
fn escape_literal(value: &str, pound: bool, followed_by_syntax: bool) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut regions: Vec<(usize, usize)> = Vec::new();

    let mut idx = 0;
    while idx < chars.len() {
        if chars[idx].is_whitespace() {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < chars.len() && !chars[idx].is_whitespace() {
            idx += 1;
        }
        let first = (start..idx).find(|&i| is_special(&chars, i, pound));
        if let Some(first) = first {
            let last = (first..idx)
                .rev()
                .find(|&i| chars[i] == '>' || is_special(&chars, i, pound))
                .unwrap_or(first);
            let mut end = last + 1;
            while chars.get(end) == Some(&'\'') {
                end += 1;
            }
            regions.push((first, end));
            idx = idx.max(end);
        }
    }

    let mut out = String::with_capacity(value.len() + 2);
    let mut region = regions.iter().peekable();
    let mut idx = 0;
    while idx < chars.len() {
        if let Some(&&(start, end)) = region.peek()
            && start == idx
        {
            out.push('\'');
            for &c in &chars[start..end] {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            out.push('\'');
            region.next();
            idx = end;
            continue;
        }

        let c = chars[idx];
        out.push(c);
        if c == '\'' {
            let double = match chars.get(idx + 1) {
                Some(&next) => next == '\'' || quotable(next, pound),
                None => followed_by_syntax,
            };
            if double {
                out.push('\'');
            }
        }
        idx += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icu::parse;

    fn roundtrip(message: &str) -> String {
        print_message(&parse(message).unwrap(), &PrintOptions::default())
    }

    #[test]
    fn test_print_is_stable_for_canonical_input() {
        for message in [
            "Hello {name}!",
            "{n, plural, offset:1 =0 {none} one {# item} other {# items}}",
            "{d, date, short} {t, time} {p, number, ::percent}",
            "<b>{a}</b> and <i>more</i>",
            "An '{escaped}' argument",
            "Line <br/> break",
        ] {
            assert_eq!(roundtrip(message), message);
        }
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("a {b} c", false, false), "a '{b}' c");
        assert_eq!(escape_literal("# items", true, true), "'#' items");
        assert_eq!(escape_literal("# items", false, true), "# items");
        assert_eq!(escape_literal("it's", false, true), "it's");
        assert_eq!(escape_literal("end'", false, true), "end''");
        assert_eq!(escape_literal("end'", false, false), "end'");
        assert_eq!(escape_literal("'{'", false, false), "'''{'''");
        assert_eq!(escape_literal("a < b", false, false), "a < b");
    }

    #[test]
    fn test_escaped_literal_parses_back() {
        for literal in ["'{'", "{it's}", "x'y {", "<b>", "a}'", "''"] {
            let escaped = escape_literal(literal, false, false);
            let nodes = parse(&escaped).unwrap();
            assert_eq!(nodes.len(), 1, "{}", escaped);
            let Node::Literal(parsed) = &nodes[0] else {
                panic!("expected literal for {}", escaped);
            };
            assert_eq!(parsed.value, literal);
        }
    }

    #[test]
    fn test_newlines_indent_with_tabs() {
        let nodes = parse("{a, select, x {1} other {2}}").unwrap();
        let printed = print_message(
            &nodes,
            &PrintOptions {
                newlines: true,
                base_level: 1,
            },
        );
        assert_eq!(printed, "{a, select,\n\t\tx {1}\n\t\tother {2}\n\t}");
    }
}

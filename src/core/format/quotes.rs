//! Locale-specific quotation marks inside message text.

use crate::core::icu::{Node, Options, SelectOption};
use crate::core::locale_data::{Delimiters, NARROW_NBSP, delimiters_for, pads_quotes};

use super::QuoteMode;

/// Stand-in for an argument or tag next to a literal.
const SYNTAX: char = 'x';

struct Quoter {
    mode: QuoteMode,
    delimiters: Delimiters,
    pad: bool,
}

/// Replace quotes in every literal with the marks of `locale`.
pub fn localize_quotes(nodes: Vec<Node>, mode: QuoteMode, locale: &str) -> Vec<Node> {
    let quoter = Quoter {
        mode,
        delimiters: delimiters_for(locale),
        pad: pads_quotes(locale),
    };
    quoter.list(nodes)
}

fn last_char(node: &Node) -> char {
    match node {
        Node::Literal(literal) => literal.value.chars().last().unwrap_or(' '),
        _ => SYNTAX,
    }
}

fn first_char(node: &Node) -> char {
    match node {
        Node::Literal(literal) => literal.value.chars().next().unwrap_or(' '),
        _ => SYNTAX,
    }
}

fn is_opening(before: &[char]) -> bool {
    match before {
        [] => true,
        [.., c] if c.is_whitespace() || matches!(c, '(' | '[') => true,
        [.., 'و'] => is_opening(&before[..before.len() - 1]),
        _ => false,
    }
}

impl Quoter {
    fn options(&self, options: Options) -> Options {
        options
            .into_iter()
            .map(|(key, option)| {
                (
                    key,
                    SelectOption {
                        value: self.list(option.value),
                        key_span: option.key_span,
                    },
                )
            })
            .collect()
    }

    fn list(&self, nodes: Vec<Node>) -> Vec<Node> {
        let prev: Vec<Option<char>> = (0..nodes.len())
            .map(|idx| idx.checked_sub(1).map(|p| last_char(&nodes[p])))
            .collect();
        let next: Vec<Option<char>> = (0..nodes.len())
            .map(|idx| nodes.get(idx + 1).map(first_char))
            .collect();

        nodes
            .into_iter()
            .enumerate()
            .map(|(idx, node)| match node {
                Node::Literal(mut literal) => {
                    literal.value = self.text(&literal.value, prev[idx], next[idx]);
                    Node::Literal(literal)
                }
                Node::Select(mut select) => {
                    select.options = self.options(select.options);
                    Node::Select(select)
                }
                Node::Plural(mut plural) => {
                    plural.options = self.options(plural.options);
                    Node::Plural(plural)
                }
                Node::Tag(mut tag) => {
                    tag.children = self.list(tag.children);
                    Node::Tag(tag)
                }
                other => other,
            })
            .collect()
    }

    fn text(&self, value: &str, prev: Option<char>, next: Option<char>) -> String {
        let straight = matches!(self.mode, QuoteMode::Straight | QuoteMode::Both);
        let source = matches!(self.mode, QuoteMode::Source | QuoteMode::Both);
        let d = &self.delimiters;

        // Context chars on both sides, so lookbehind and lookahead are uniform.
        let mut chars: Vec<char> = prev.into_iter().collect();
        let offset = chars.len();
        chars.extend(value.chars());
        let inner_end = chars.len();
        chars.extend(next);

        let mut out = String::with_capacity(value.len());
        for idx in offset..inner_end {
            let c = chars[idx];
            let opening = is_opening(&chars[..idx]);
            let between_words = idx > 0
                && !chars[idx - 1].is_whitespace()
                && chars.get(idx + 1).is_some_and(|n| !n.is_whitespace());

            let replacement = match c {
                '\'' if straight => Some(if opening {
                    d.alternate_start
                } else if between_words {
                    d.apostrophe
                } else {
                    d.alternate_end
                }),
                '"' if straight => Some(if opening {
                    d.quotation_start
                } else {
                    d.quotation_end
                }),
                '“' | '”' | '‘' | '’' if source && d.fits(c, opening, between_words) => None,
                '“' | '”' if source => Some(if opening {
                    d.quotation_start
                } else {
                    d.quotation_end
                }),
                '‘' | '’' if source => Some(if between_words {
                    d.apostrophe
                } else if opening {
                    d.alternate_start
                } else {
                    d.alternate_end
                }),
                _ => None,
            };
            match replacement {
                Some(mark) => out.push_str(mark),
                None => out.push(c),
            }
        }

        if self.pad { pad_guillemets(&out) } else { out }
    }
}

/// Ensure a narrow no-break space inside `«` and `»`.
fn pad_guillemets(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 6);
    let mut idx = 0;
    while idx < chars.len() {
        let c = chars[idx];
        match c {
            '«' => {
                out.push(c);
                if matches!(chars.get(idx + 1), Some(' ' | '\u{a0}')) {
                    idx += 1;
                }
                if chars.get(idx + 1) != Some(&NARROW_NBSP) {
                    out.push(NARROW_NBSP);
                }
            }
            '»' => {
                if out.ends_with([' ', '\u{a0}']) {
                    out.pop();
                }
                if !out.ends_with(NARROW_NBSP) {
                    out.push(NARROW_NBSP);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
        idx += 1;
    }
    out
}

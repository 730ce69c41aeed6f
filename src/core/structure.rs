//! Non-translatable ICU syntax inside a message.
//!
//! A single regular expression picks out opening braces up to the next brace,
//! closing-brace tails up to the next brace, lone `{`/`#` and whitespace
//! before a `}`. Quote-escaped regions are masked before matching so that
//! escaped braces count as text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static STRUCTURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*?[{}]|\s*\}.*?[{}]|[{#]|\s*\}").unwrap());

fn is_quotable(c: char) -> bool {
    matches!(c, '{' | '}' | '<' | '>' | '#')
}

/// Byte ranges of quote-escaped literal regions, quotes included.
///
/// `''` is an escaped apostrophe and never opens a region. An unterminated
/// region runs to the end of the message.
pub fn escaped_regions(message: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut chars = message.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '\'' {
            continue;
        }
        match chars.peek() {
            Some((_, '\'')) => {
                chars.next();
            }
            Some((_, next)) if is_quotable(*next) => {
                let mut end = message.len();
                while let Some((idx, inner)) = chars.next() {
                    if inner == '\'' {
                        if matches!(chars.peek(), Some((_, '\''))) {
                            chars.next();
                            continue;
                        }
                        end = idx + 1;
                        break;
                    }
                }
                regions.push(start..end);
            }
            _ => {}
        }
    }

    regions
}

/// Copy of `message` with escaped regions replaced by NUL bytes.
///
/// Byte offsets are preserved.
fn mask_escaped(message: &str) -> String {
    let regions = escaped_regions(message);
    if regions.is_empty() {
        return message.to_string();
    }
    let mut masked = String::with_capacity(message.len());
    let mut last = 0;
    for region in regions {
        masked.push_str(&message[last..region.start]);
        masked.extend(std::iter::repeat_n('\0', region.end - region.start));
        last = region.end;
    }
    masked.push_str(&message[last..]);
    masked
}

/// Byte ranges of every structural fragment, in order.
pub fn structure_spans(message: &str) -> Vec<Range<usize>> {
    let masked = mask_escaped(message);
    STRUCTURE_RE
        .find_iter(&masked)
        .map(|m| m.range())
        .collect()
}

/// Concatenation of every structural fragment.
pub fn extract_structure(message: &str) -> String {
    structure_spans(message)
        .into_iter()
        .map(|range| &message[range])
        .collect()
}

/// `message` with every structural fragment removed.
pub fn strip_structure(message: &str) -> String {
    let mut stripped = String::with_capacity(message.len());
    let mut last = 0;
    for range in structure_spans(message) {
        stripped.push_str(&message[last..range.start]);
        last = range.end;
    }
    stripped.push_str(&message[last..]);
    stripped
}

/// Byte offset of the first no-break space inside a structural fragment.
pub fn find_structural_nbsp(message: &str) -> Option<usize> {
    structure_spans(message).into_iter().find_map(|range| {
        message[range.clone()]
            .find('\u{a0}')
            .map(|idx| range.start + idx)
    })
}

/// Counts of `{` and `}` outside escaped regions.
pub fn count_braces(message: &str) -> (usize, usize) {
    let masked = mask_escaped(message);
    masked.chars().fold((0, 0), |(open, close), c| match c {
        '{' => (open + 1, close),
        '}' => (open, close + 1),
        _ => (open, close),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_structure() {
        assert_eq!(extract_structure("Hello {name}!"), "{name}");
        assert_eq!(
            extract_structure("{a, select, x {foo} other {bar}}"),
            "{a, select, x {} other {}}"
        );
    }

    #[test]
    fn test_escaped_braces_are_text() {
        assert_eq!(extract_structure("An '{escaped}' {arg}"), "{arg}");
        assert_eq!(strip_structure("An '{escaped}' {arg}"), "An '{escaped}' ");
    }

    #[test]
    fn test_escaped_regions() {
        assert_eq!(escaped_regions("It''s '{x}' ok"), vec![6..11]);
        assert_eq!(escaped_regions("'{open"), vec![0..6]);
        assert!(escaped_regions("don't").is_empty());
    }

    #[test]
    fn test_pound_is_structure() {
        assert_eq!(
            extract_structure("{n, plural, other {# items}}"),
            "{n, plural, other {#}}"
        );
    }

    #[test]
    fn test_find_structural_nbsp() {
        assert_eq!(find_structural_nbsp("{a, select,\u{a0}other {}}"), Some(11));
        assert_eq!(find_structural_nbsp("Hello\u{a0}world"), None);
    }

    #[test]
    fn test_count_braces() {
        assert_eq!(count_braces("{a, plural, one {An {arg} other {}}"), (4, 3));
        assert_eq!(count_braces("{a, plural, one {An {arg}'}'} other {}}"), (4, 4));
    }
}

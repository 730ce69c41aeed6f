//! JavaScript-style string escapes in resource values.

use std::{iter::Peekable, str::CharIndices};

use crate::core::data::QuoteChar;

/// Visit every decoded char with the byte offset of its raw representation.
///
/// Returns the message and raw offset of a malformed escape.
fn walk(raw: &str, mut visit: impl FnMut(usize, char)) -> Result<(), (String, usize)> {
    let mut chars = raw.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '\\' {
            visit(idx, c);
            continue;
        }
        let Some((_, escaped)) = chars.next() else {
            return Err(("Unfinished escape sequence".to_string(), idx));
        };
        let decoded = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            // Line continuation.
            '\n' => continue,
            '\r' => {
                if chars.peek().is_some_and(|(_, c)| *c == '\n') {
                    chars.next();
                }
                continue;
            }
            'u' | 'x' => {
                let invalid = || ("Invalid escape sequence".to_string(), idx);
                let code = hex_escape(&mut chars, escaped).ok_or_else(invalid)?;
                // UTF-16 pair written as two escapes.
                let code = match code {
                    0xD800..=0xDBFF => low_surrogate(&mut chars)
                        .map(|low| 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                        .unwrap_or(code),
                    _ => code,
                };
                char::from_u32(code).ok_or_else(invalid)?
            }
            other => other,
        };
        visit(idx, decoded);
    }
    Ok(())
}

/// Code point of a `\u` or `\x` escape whose letter was just consumed.
fn hex_escape(chars: &mut Peekable<CharIndices<'_>>, escaped: char) -> Option<u32> {
    let braced = escaped == 'u' && chars.peek().is_some_and(|(_, c)| *c == '{');
    if braced {
        chars.next();
    }
    let mut hex = String::new();
    let width = if escaped == 'x' { 2 } else { 4 };
    while let Some(&(_, h)) = chars.peek() {
        if braced {
            chars.next();
            if h == '}' {
                break;
            }
        } else if hex.len() < width && h.is_ascii_hexdigit() {
            chars.next();
        } else {
            break;
        }
        hex.push(h);
    }
    if !braced && hex.len() != width {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// Consume a following `\uDC00`-`\uDFFF` escape, leaving `chars` untouched otherwise.
fn low_surrogate(chars: &mut Peekable<CharIndices<'_>>) -> Option<u32> {
    let mut ahead = chars.clone();
    if ahead.next()?.1 != '\\' || ahead.next()?.1 != 'u' {
        return None;
    }
    let low = hex_escape(&mut ahead, 'u').filter(|low| (0xDC00..=0xDFFF).contains(low))?;
    *chars = ahead;
    Some(low)
}

/// Resolve escapes of a raw string body.
pub fn unescape(raw: &str) -> Result<String, (String, usize)> {
    let mut value = String::with_capacity(raw.len());
    walk(raw, |_, c| value.push(c))?;
    Ok(value)
}

/// Byte offset in `raw` of the char at `value_offset` in its decoded form.
///
/// Offsets past the end map to the end of `raw`.
pub fn raw_offset(raw: &str, value_offset: usize) -> usize {
    let mut decoded_len = 0;
    let mut found = None;
    // A malformed escape still leaves the offsets visited before it.
    let _ = walk(raw, |idx, c| {
        if found.is_none() && decoded_len >= value_offset {
            found = Some(idx);
        }
        decoded_len += c.len_utf8();
    });
    found.unwrap_or(raw.len())
}

/// Escape `value` for writing between `quote` characters.
pub fn escape(value: &str, quote: QuoteChar) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' if quote != QuoteChar::Backtick => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' if quote == QuoteChar::Double => out.push_str("\\t"),
            '"' if quote == QuoteChar::Double => out.push_str("\\\""),
            '\'' if quote == QuoteChar::Single => out.push_str("\\'"),
            '`' if quote == QuoteChar::Backtick => out.push_str("\\`"),
            // Template literal interpolation.
            '$' if quote == QuoteChar::Backtick && chars.peek() == Some(&'{') => {
                out.push_str("\\$")
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a\"b\n\u00a0\\"#).unwrap(), "a\"b\n\u{a0}\\");
        assert_eq!(unescape(r"\u{1F600}").unwrap(), "\u{1F600}");
        assert_eq!(unescape(r"it\'s").unwrap(), "it's");
        assert!(unescape(r"\u12").is_err());
    }

    #[test]
    fn test_surrogate_pair_escape() {
        assert_eq!(unescape(r"Smile \ud83d\ude00!").unwrap(), "Smile \u{1F600}!");
        assert!(unescape(r"\ud83d").is_err());
        assert!(unescape(r"\ud83d\u0041").is_err());
        assert!(unescape(r"\ude00").is_err());

        let raw = r"\ud83d\ude00{x}";
        assert_eq!(raw_offset(raw, 4), raw.find('{').unwrap());
    }

    #[test]
    fn test_raw_offset() {
        let raw = r#"say \"{x}\""#;
        let value = unescape(raw).unwrap();
        let brace = value.find('{').unwrap();
        assert_eq!(raw_offset(raw, brace), raw.find('{').unwrap());
        assert_eq!(raw_offset(raw, value.len()), raw.len());
    }

    #[test]
    fn test_escape_depends_on_quote() {
        assert_eq!(escape("a \"b\"\nc", QuoteChar::Double), r#"a \"b\"\nc"#);
        assert_eq!(escape("it's", QuoteChar::Double), "it's");
        assert_eq!(escape("it's", QuoteChar::Single), r"it\'s");
        assert_eq!(escape("a\nb", QuoteChar::Backtick), "a\nb");
        assert_eq!(escape("$${n} $", QuoteChar::Backtick), r"$\${n} $");
    }
}

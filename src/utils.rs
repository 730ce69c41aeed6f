//! Common utility functions shared across the codebase.

/// Language subtag of a locale code (`en-GB` -> `en`).
///
/// # Examples
///
/// ```
/// use mfv::utils::language_subtag;
///
/// assert_eq!(language_subtag("en-gb"), "en");
/// assert_eq!(language_subtag("zh_TW"), "zh");
/// assert_eq!(language_subtag("ja"), "ja");
/// ```
pub fn language_subtag(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Whether two locale codes share a language subtag, ignoring case.
pub fn same_language(a: &str, b: &str) -> bool {
    language_subtag(a).eq_ignore_ascii_case(language_subtag(b))
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Number of characters before `offset` in `text`.
pub fn char_count_before(text: &str, offset: usize) -> usize {
    let mut boundary = offset.min(text.len());
    while !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    text[..boundary].chars().count()
}

/// Conjunction list in English: `a`, `a and b`, `a, b, and c`.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}, and {}", head, last.as_ref())
        }
    }
}

/// Wrap every item in double quotes and join as a conjunction list.
pub fn format_quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("\"{}\"", s.as_ref()))
        .collect();
    format_list(&quoted)
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_language_subtag() {
        assert_eq!(language_subtag("fr-CA"), "fr");
        assert_eq!(language_subtag(""), "");
        assert!(same_language("en", "EN-gb"));
        assert!(!same_language("en", "es-mx"));
    }

    #[test]
    fn test_offset_to_line() {
        let index = build_line_index("a\nbc\n\nd");
        assert_eq!(index, vec![0, 2, 5, 6]);
        assert_eq!(offset_to_line(&index, 0), 1);
        assert_eq!(offset_to_line(&index, 1), 1);
        assert_eq!(offset_to_line(&index, 2), 2);
        assert_eq!(offset_to_line(&index, 4), 2);
        assert_eq!(offset_to_line(&index, 6), 4);
    }

    #[test]
    fn test_char_count_before() {
        assert_eq!(char_count_before("ñab", 2), 1);
        assert_eq!(char_count_before("ñab", 1), 0);
        assert_eq!(char_count_before("abc", 10), 3);
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list::<&str>(&[]), "");
        assert_eq!(format_list(&["a"]), "a");
        assert_eq!(format_list(&["a", "b"]), "a and b");
        assert_eq!(format_list(&["a", "b", "c"]), "a, b, and c");
        assert_eq!(
            format_quoted_list(&["one", "other"]),
            "\"one\" and \"other\""
        );
    }
}

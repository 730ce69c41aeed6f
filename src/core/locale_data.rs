//! CLDR quotation delimiters per locale.

use crate::utils::language_subtag;

/// Locale-specific quotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub quotation_start: &'static str,
    pub quotation_end: &'static str,
    pub alternate_start: &'static str,
    pub alternate_end: &'static str,
    pub apostrophe: &'static str,
}

impl Delimiters {
    const fn new(
        quotation_start: &'static str,
        quotation_end: &'static str,
        alternate_start: &'static str,
        alternate_end: &'static str,
        apostrophe: &'static str,
    ) -> Self {
        Self {
            quotation_start,
            quotation_end,
            alternate_start,
            alternate_end,
            apostrophe,
        }
    }

    /// Whether `mark` is one of these delimiters in a position it can hold.
    pub fn fits(&self, mark: char, opening: bool, between_words: bool) -> bool {
        let mut buf = [0; 4];
        let mark = &*mark.encode_utf8(&mut buf);
        if opening {
            mark == self.quotation_start || mark == self.alternate_start
        } else {
            mark == self.quotation_end
                || mark == self.alternate_end
                || (between_words && mark == self.apostrophe)
        }
    }

    /// Primary and alternate marks exchanged.
    fn swapped(self) -> Self {
        Self {
            quotation_start: self.alternate_start,
            quotation_end: self.alternate_end,
            alternate_start: self.quotation_start,
            alternate_end: self.quotation_end,
            apostrophe: self.apostrophe,
        }
    }
}

const ENGLISH: Delimiters = Delimiters::new("“", "”", "‘", "’", "’");

/// Sorted by tag.
const DELIMITERS: &[(&str, Delimiters)] = &[
    ("ar", Delimiters::new("”", "“", "’", "‘", "’")),
    ("cy", ENGLISH),
    ("da", ENGLISH),
    ("de", Delimiters::new("„", "“", "‚", "‘", "’")),
    ("en", ENGLISH),
    ("en-gb", ENGLISH),
    ("es", ENGLISH),
    ("es-es", ENGLISH),
    ("fr", Delimiters::new("«", "»", "«", "»", "’")),
    ("fr-ca", Delimiters::new("«", "»", "«", "»", "’")),
    ("haw", Delimiters::new("“", "”", "‘", "’", "'")),
    ("hi", ENGLISH),
    ("ja", Delimiters::new("「", "」", "『", "』", "’")),
    ("ko", ENGLISH),
    ("mi", Delimiters::new("\"", "\"", "\"", "\"", "’")),
    ("nl", Delimiters::new("‘", "’", "‘", "’", "’")),
    ("pt", ENGLISH),
    ("sv", Delimiters::new("”", "”", "’", "’", "’")),
    ("tr", ENGLISH),
    ("zh-cn", ENGLISH),
    ("zh-tw", ENGLISH),
];

/// Locales whose guillemets are padded with a narrow no-break space.
pub const PADDED_QUOTE_LOCALES: &[&str] = &["fr", "fr-ca", "fr-fr", "fr-on", "vi-vn"];

pub const NARROW_NBSP: char = '\u{202F}';

fn lookup(tag: &str) -> Option<Delimiters> {
    DELIMITERS
        .binary_search_by(|(code, _)| (*code).cmp(tag))
        .ok()
        .map(|idx| DELIMITERS[idx].1)
}

/// Delimiters for `locale`, falling back to the language subtag and then `en`.
///
/// British-style locales (`xx-GB`) swap primary and alternate marks.
pub fn delimiters_for(locale: &str) -> Delimiters {
    let tag = locale.to_ascii_lowercase().replace('_', "-");
    let delimiters = lookup(&tag)
        .or_else(|| lookup(language_subtag(&tag)))
        .unwrap_or(ENGLISH);

    if tag.ends_with("-gb") {
        delimiters.swapped()
    } else {
        delimiters
    }
}

pub fn pads_quotes(locale: &str) -> bool {
    let tag = locale.to_ascii_lowercase().replace('_', "-");
    PADDED_QUOTE_LOCALES.contains(&tag.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(DELIMITERS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_delimiters_lookup() {
        assert_eq!(delimiters_for("de").quotation_start, "„");
        assert_eq!(delimiters_for("de-AT").quotation_start, "„");
        assert_eq!(delimiters_for("xx").quotation_start, "“");
        assert_eq!(delimiters_for("haw").apostrophe, "'");
    }

    #[test]
    fn test_british_locales_swap_marks() {
        let gb = delimiters_for("en-GB");
        assert_eq!(gb.quotation_start, "‘");
        assert_eq!(gb.alternate_start, "“");
    }

    #[test]
    fn test_fits_by_position() {
        let de = delimiters_for("de");
        assert!(de.fits('„', true, false));
        assert!(!de.fits('“', true, false));
        assert!(de.fits('“', false, false));
        assert!(de.fits('’', false, true));
        assert!(!de.fits('’', false, false));
    }

    #[test]
    fn test_padded_locales() {
        assert!(pads_quotes("fr"));
        assert!(pads_quotes("fr-CA"));
        assert!(!pads_quotes("fr-ch"));
        assert!(!pads_quotes("de"));
    }
}

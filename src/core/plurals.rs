//! CLDR plural categories per locale.
//!
//! Only the category sets are needed (which keys are legal in a plural),
//! not the rules mapping numbers to categories. Lookup tries the full tag,
//! then the language subtag, then `en`.

use crate::core::icu::PluralType;
use crate::utils::language_subtag;

/// Canonical category order.
pub const CATEGORY_ORDER: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

const OTHER: &[&str] = &["other"];
const ONE_OTHER: &[&str] = &["one", "other"];
const ONE_MANY_OTHER: &[&str] = &["one", "many", "other"];
const MANY_OTHER: &[&str] = &["many", "other"];
const FEW_OTHER: &[&str] = &["few", "other"];
const ZERO_ONE_OTHER: &[&str] = &["zero", "one", "other"];
const ONE_TWO_OTHER: &[&str] = &["one", "two", "other"];
const ONE_FEW_OTHER: &[&str] = &["one", "few", "other"];
const ONE_TWO_FEW_OTHER: &[&str] = &["one", "two", "few", "other"];
const ONE_TWO_MANY_OTHER: &[&str] = &["one", "two", "many", "other"];
const ONE_FEW_MANY_OTHER: &[&str] = &["one", "few", "many", "other"];
const ONE_TWO_FEW_MANY_OTHER: &[&str] = &["one", "two", "few", "many", "other"];
const ALL: &[&str] = &["zero", "one", "two", "few", "many", "other"];

/// Cardinal categories, sorted by tag for binary search.
const CARDINAL: &[(&str, &[&str])] = &[
    ("af", ONE_OTHER),
    ("ak", ONE_OTHER),
    ("am", ONE_OTHER),
    ("an", ONE_OTHER),
    ("ar", ALL),
    ("ars", ALL),
    ("as", ONE_OTHER),
    ("ast", ONE_OTHER),
    ("az", ONE_OTHER),
    ("be", ONE_FEW_MANY_OTHER),
    ("bg", ONE_OTHER),
    ("bm", OTHER),
    ("bn", ONE_OTHER),
    ("bo", OTHER),
    ("br", ONE_TWO_FEW_MANY_OTHER),
    ("bs", ONE_FEW_OTHER),
    ("ca", ONE_MANY_OTHER),
    ("ce", ONE_OTHER),
    ("ckb", ONE_OTHER),
    ("cs", ONE_FEW_MANY_OTHER),
    ("cy", ALL),
    ("da", ONE_OTHER),
    ("de", ONE_OTHER),
    ("dsb", ONE_TWO_FEW_OTHER),
    ("dz", OTHER),
    ("ee", ONE_OTHER),
    ("el", ONE_OTHER),
    ("en", ONE_OTHER),
    ("eo", ONE_OTHER),
    ("es", ONE_MANY_OTHER),
    ("et", ONE_OTHER),
    ("eu", ONE_OTHER),
    ("fa", ONE_OTHER),
    ("ff", ONE_OTHER),
    ("fi", ONE_OTHER),
    ("fil", ONE_OTHER),
    ("fo", ONE_OTHER),
    ("fr", ONE_MANY_OTHER),
    ("fur", ONE_OTHER),
    ("fy", ONE_OTHER),
    ("ga", ONE_TWO_FEW_MANY_OTHER),
    ("gd", ONE_TWO_FEW_OTHER),
    ("gl", ONE_OTHER),
    ("gsw", ONE_OTHER),
    ("gu", ONE_OTHER),
    ("gv", ONE_TWO_FEW_MANY_OTHER),
    ("ha", ONE_OTHER),
    ("haw", ONE_OTHER),
    ("he", ONE_TWO_OTHER),
    ("hi", ONE_OTHER),
    ("hr", ONE_FEW_OTHER),
    ("hsb", ONE_TWO_FEW_OTHER),
    ("hu", ONE_OTHER),
    ("hy", ONE_OTHER),
    ("ia", ONE_OTHER),
    ("id", OTHER),
    ("ig", OTHER),
    ("is", ONE_OTHER),
    ("it", ONE_MANY_OTHER),
    ("iu", ONE_TWO_OTHER),
    ("ja", OTHER),
    ("jv", OTHER),
    ("ka", ONE_OTHER),
    ("kab", ONE_OTHER),
    ("kk", ONE_OTHER),
    ("kl", ONE_OTHER),
    ("km", OTHER),
    ("kn", ONE_OTHER),
    ("ko", OTHER),
    ("ks", ONE_OTHER),
    ("ksh", ZERO_ONE_OTHER),
    ("ku", ONE_OTHER),
    ("kw", ALL),
    ("ky", ONE_OTHER),
    ("lag", ZERO_ONE_OTHER),
    ("lb", ONE_OTHER),
    ("lg", ONE_OTHER),
    ("ln", ONE_OTHER),
    ("lo", OTHER),
    ("lt", ONE_FEW_MANY_OTHER),
    ("lv", ZERO_ONE_OTHER),
    ("mg", ONE_OTHER),
    ("mi", ONE_OTHER),
    ("mk", ONE_OTHER),
    ("ml", ONE_OTHER),
    ("mn", ONE_OTHER),
    ("mo", ONE_FEW_OTHER),
    ("mr", ONE_OTHER),
    ("ms", OTHER),
    ("mt", ONE_TWO_FEW_MANY_OTHER),
    ("my", OTHER),
    ("nb", ONE_OTHER),
    ("nd", ONE_OTHER),
    ("ne", ONE_OTHER),
    ("nl", ONE_OTHER),
    ("nn", ONE_OTHER),
    ("no", ONE_OTHER),
    ("nr", ONE_OTHER),
    ("nso", ONE_OTHER),
    ("ny", ONE_OTHER),
    ("om", ONE_OTHER),
    ("or", ONE_OTHER),
    ("os", ONE_OTHER),
    ("pa", ONE_OTHER),
    ("pcm", ONE_OTHER),
    ("pl", ONE_FEW_MANY_OTHER),
    ("ps", ONE_OTHER),
    ("pt", ONE_MANY_OTHER),
    ("rm", ONE_OTHER),
    ("ro", ONE_FEW_OTHER),
    ("ru", ONE_FEW_MANY_OTHER),
    ("sah", OTHER),
    ("sat", ONE_TWO_OTHER),
    ("sc", ONE_OTHER),
    ("scn", ONE_OTHER),
    ("sd", ONE_OTHER),
    ("se", ONE_TWO_OTHER),
    ("sg", OTHER),
    ("shi", ONE_FEW_OTHER),
    ("si", ONE_OTHER),
    ("sk", ONE_FEW_MANY_OTHER),
    ("sl", ONE_TWO_FEW_OTHER),
    ("sma", ONE_TWO_OTHER),
    ("smn", ONE_TWO_OTHER),
    ("sn", ONE_OTHER),
    ("so", ONE_OTHER),
    ("sq", ONE_OTHER),
    ("sr", ONE_FEW_OTHER),
    ("ss", ONE_OTHER),
    ("st", ONE_OTHER),
    ("su", OTHER),
    ("sv", ONE_OTHER),
    ("sw", ONE_OTHER),
    ("ta", ONE_OTHER),
    ("te", ONE_OTHER),
    ("th", OTHER),
    ("ti", ONE_OTHER),
    ("tk", ONE_OTHER),
    ("tl", ONE_OTHER),
    ("tn", ONE_OTHER),
    ("to", OTHER),
    ("tr", ONE_OTHER),
    ("ts", ONE_OTHER),
    ("ug", ONE_OTHER),
    ("uk", ONE_FEW_MANY_OTHER),
    ("ur", ONE_OTHER),
    ("uz", ONE_OTHER),
    ("ve", ONE_OTHER),
    ("vi", OTHER),
    ("wa", ONE_OTHER),
    ("wo", OTHER),
    ("xh", ONE_OTHER),
    ("yi", ONE_OTHER),
    ("yo", OTHER),
    ("yue", OTHER),
    ("zh", OTHER),
    ("zu", ONE_OTHER),
];

/// Ordinal categories, sorted by tag. Languages not listed only have `other`.
const ORDINAL: &[(&str, &[&str])] = &[
    ("af", OTHER),
    ("am", OTHER),
    ("ar", OTHER),
    ("as", ONE_TWO_FEW_MANY_OTHER),
    ("az", ONE_FEW_MANY_OTHER),
    ("be", FEW_OTHER),
    ("bg", OTHER),
    ("bn", ONE_TWO_FEW_MANY_OTHER),
    ("ca", ONE_TWO_FEW_OTHER),
    ("cs", OTHER),
    ("cy", ALL),
    ("da", OTHER),
    ("de", OTHER),
    ("el", OTHER),
    ("en", ONE_TWO_FEW_OTHER),
    ("es", OTHER),
    ("et", OTHER),
    ("eu", OTHER),
    ("fa", OTHER),
    ("fi", OTHER),
    ("fil", ONE_OTHER),
    ("fr", ONE_OTHER),
    ("ga", ONE_OTHER),
    ("gd", ONE_TWO_FEW_OTHER),
    ("gl", OTHER),
    ("gu", ONE_TWO_FEW_MANY_OTHER),
    ("he", OTHER),
    ("hi", ONE_TWO_FEW_MANY_OTHER),
    ("hr", OTHER),
    ("hu", ONE_OTHER),
    ("hy", ONE_OTHER),
    ("id", OTHER),
    ("is", OTHER),
    ("it", MANY_OTHER),
    ("ja", OTHER),
    ("ka", ONE_MANY_OTHER),
    ("kk", MANY_OTHER),
    ("km", OTHER),
    ("kn", OTHER),
    ("ko", OTHER),
    ("kw", ONE_MANY_OTHER),
    ("ky", OTHER),
    ("lo", ONE_OTHER),
    ("lt", OTHER),
    ("lv", OTHER),
    ("mk", ONE_TWO_MANY_OTHER),
    ("ml", OTHER),
    ("mn", OTHER),
    ("mo", ONE_OTHER),
    ("mr", ONE_TWO_FEW_OTHER),
    ("ms", ONE_OTHER),
    ("my", OTHER),
    ("nb", OTHER),
    ("ne", ONE_OTHER),
    ("nl", OTHER),
    ("or", ONE_TWO_FEW_MANY_OTHER),
    ("pa", OTHER),
    ("pl", OTHER),
    ("pt", OTHER),
    ("ro", ONE_OTHER),
    ("ru", OTHER),
    ("sc", MANY_OTHER),
    ("scn", MANY_OTHER),
    ("si", OTHER),
    ("sk", OTHER),
    ("sl", OTHER),
    ("sq", ONE_MANY_OTHER),
    ("sr", OTHER),
    ("sv", ONE_OTHER),
    ("sw", OTHER),
    ("ta", OTHER),
    ("te", OTHER),
    ("th", OTHER),
    ("tk", FEW_OTHER),
    ("tl", ONE_OTHER),
    ("tr", OTHER),
    ("uk", FEW_OTHER),
    ("ur", OTHER),
    ("uz", OTHER),
    ("vi", ONE_OTHER),
    ("yue", OTHER),
    ("zh", OTHER),
    ("zu", OTHER),
];

fn lookup(table: &'static [(&'static str, &'static [&'static str])], tag: &str) -> Option<&'static [&'static str]> {
    table
        .binary_search_by(|(code, _)| (*code).cmp(tag))
        .ok()
        .map(|idx| table[idx].1)
}

/// Ordered legal categories for `locale`.
///
/// Falls back to the language subtag, then to `en`.
pub fn categories_for(locale: &str, plural_type: PluralType) -> &'static [&'static str] {
    let tag = locale.to_ascii_lowercase().replace('_', "-");
    let language = language_subtag(&tag);

    match plural_type {
        PluralType::Cardinal => lookup(CARDINAL, &tag)
            .or_else(|| lookup(CARDINAL, language))
            .unwrap_or(ONE_OTHER),
        PluralType::Ordinal => {
            if let Some(categories) = lookup(ORDINAL, &tag).or_else(|| lookup(ORDINAL, language)) {
                return categories;
            }
            // Languages with cardinal data but no ordinal distinctions.
            if lookup(CARDINAL, language).is_some() {
                OTHER
            } else {
                ONE_TWO_FEW_OTHER
            }
        }
    }
}

/// Position of a category in the canonical order, `None` for unknown keys.
pub fn category_rank(category: &str) -> Option<usize> {
    CATEGORY_ORDER.iter().position(|c| *c == category)
}

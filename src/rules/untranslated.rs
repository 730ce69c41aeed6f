//! Untranslated message detection.
//!
//! A target is untranslated when, stripped of ICU structure, punctuation and
//! whitespace, it reads the same as its source. Translators can confirm an
//! intentionally identical text with `["text", {"translated": true,
//! "sourceHash": "..."}]`; the override lapses as soon as the source changes.

use base64::{Engine, engine::general_purpose::STANDARD};
use sha1::{Digest, Sha1};

use crate::{
    core::{data::MessageOptions, structure::strip_structure},
    issues::IssueType,
    rules::reporter::{KeyContext, Position, Reporter},
    utils::same_language,
};

/// base64(SHA-1) of a source message, as stored in `sourceHash`.
pub fn source_hash(source: &str) -> String {
    STANDARD.encode(Sha1::digest(source.as_bytes()))
}

fn is_ignorable(c: char) -> bool {
    matches!(c, '\u{2000}'..='\u{206f}' | '\u{2e00}'..='\u{2e7f}')
        || c.is_ascii_punctuation()
        || c.is_whitespace()
}

/// Translatable text of a message with punctuation and whitespace removed.
pub fn comparable_text(message: &str) -> String {
    strip_structure(message)
        .chars()
        .filter(|c| !is_ignorable(*c))
        .collect()
}

fn is_confirmed(options: &MessageOptions, source: &str) -> bool {
    options.translated
        && options
            .source_hash
            .as_deref()
            .is_some_and(|hash| hash == source_hash(source))
}

pub struct UntranslatedInput<'a> {
    pub target: &'a str,
    pub source: &'a str,
    pub target_locale: &'a str,
    pub source_locale: &'a str,
    pub options: &'a MessageOptions,
}

pub fn check_untranslated(
    input: &UntranslatedInput<'_>,
    ctx: &KeyContext<'_>,
    reporter: &mut Reporter<'_>,
) {
    if same_language(input.target_locale, input.source_locale) {
        return;
    }
    let source = comparable_text(input.source);
    if source.is_empty() || comparable_text(input.target) != source {
        return;
    }
    if is_confirmed(input.options, input.source) {
        return;
    }
    reporter.warning(
        IssueType::Untranslated,
        ctx,
        "String has not been translated.",
        Position::Message(0),
    );
}

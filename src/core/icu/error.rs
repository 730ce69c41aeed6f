use std::fmt;

/// What went wrong while parsing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Generic syntax error (`Expected "," but "b" found.`).
    Syntax,
    /// A select/plural without an `other` option while one is required.
    MissingOther,
    /// A plural key that is not a category of the target locale.
    InvalidPluralKey { key: String, argument: String },
    /// An option key used twice in the same select/plural.
    DuplicateKey { key: String },
    /// Closing tag does not match the open tag, or a tag is never closed.
    Tag,
}

/// Structured parse failure.
///
/// `offset` is a byte offset into the message, `column` the 0-based
/// character column of the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub offset: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, message: String, text: &str, offset: usize) -> Self {
        let column = text
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset);
        Self {
            kind,
            message,
            offset,
            column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

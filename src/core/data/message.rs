use std::{collections::BTreeMap, fmt, ops::Range, path::PathBuf};

use indexmap::{IndexMap, IndexSet};

/// Per-message overrides stored next to the text: `["text", {...}]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    /// The translator confirmed that the text is intentionally identical.
    pub translated: bool,
    /// base64(SHA-1) of the source text the override applies to.
    pub source_hash: Option<String>,
}

/// Quote style of a key or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteChar {
    Double,
    Single,
    Backtick,
    /// Unquoted key.
    Bare,
}

impl QuoteChar {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(QuoteChar::Double),
            '\'' => Some(QuoteChar::Single),
            '`' => Some(QuoteChar::Backtick),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuoteChar::Double => "\"",
            QuoteChar::Single => "'",
            QuoteChar::Backtick => "`",
            QuoteChar::Bare => "",
        }
    }
}

impl fmt::Display for QuoteChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `key: value` entry of a resource file.
///
/// All spans are byte ranges into the file contents and cover verbatim text,
/// so edits are plain range replacements.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    /// Full key; nested objects are joined with `.`.
    pub key: String,
    /// Key as written in its own object.
    pub local_key: String,
    /// Message text with string escapes resolved.
    pub value: String,
    /// Message text as written between the quotes.
    pub raw_value: String,
    pub key_quote: QuoteChar,
    pub value_quote: QuoteChar,
    /// Trailing comment on the record's last line, verbatim.
    pub comment: Option<String>,
    /// Byte offset of the separating comma.
    pub comma: Option<usize>,
    /// Indentation of the line holding the key.
    pub leading_whitespace: String,
    /// Key through end of value.
    pub span: Range<usize>,
    /// Lines fully owned by the record, including comma, comment and newline.
    pub line_span: Range<usize>,
    pub key_span: Range<usize>,
    /// Whole value: string with quotes, array or object.
    pub body_span: Range<usize>,
    /// Message text inside its quotes.
    pub value_span: Range<usize>,
    /// 1-based line of the key.
    pub line: usize,
    pub options: MessageOptions,
}

impl MessageRecord {
    pub fn has_comma(&self) -> bool {
        self.comma.is_some()
    }

    /// Text to insert this record into another file.
    pub fn verbatim<'a>(&self, contents: &'a str) -> &'a str {
        &contents[self.span.clone()]
    }
}

/// `.json` file that scanned but is not strict JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Resource file that could not be scanned at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for ScanError {}

/// All messages of one locale file.
#[derive(Debug, Clone)]
pub struct LocaleResource {
    pub locale: String,
    pub file_path: PathBuf,
    pub contents: String,
    /// Records in file order.
    pub messages: IndexMap<String, MessageRecord>,
    pub duplicate_keys: IndexSet<String>,
    pub json_error: Option<JsonError>,
    pub scan_error: Option<ScanError>,
}

impl LocaleResource {
    pub fn new(locale: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            contents: String::new(),
            messages: IndexMap::new(),
            duplicate_keys: IndexSet::new(),
            json_error: None,
            scan_error: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MessageRecord> {
        self.messages.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn display_path(&self) -> String {
        self.file_path.to_string_lossy().to_string()
    }
}

/// Locale code to resource, sorted by code.
pub type LocaleResources = BTreeMap<String, LocaleResource>;

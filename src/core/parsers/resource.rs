//! Scanner for locale resource files.
//!
//! Accepts JSON and the JavaScript object-literal flavour commonly used for
//! message catalogs: single, double and backtick quotes, bare keys, comments,
//! trailing commas and a `module.exports =` / `export default` prefix. Every
//! record keeps exact byte spans so that edits never re-locate text by search.

use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;

use super::escape::unescape;
use crate::core::data::{
    JsonError, LocaleResource, LocaleResources, MessageOptions, MessageRecord, QuoteChar,
    ScanError,
};
use crate::utils::{build_line_index, offset_to_line};

/// File extensions recognised as locale resources.
pub const RESOURCE_EXTENSIONS: &[&str] = &["json", "json5", "js", "cjs", "mjs", "ts"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Values may be objects holding the text in a `message` field.
    pub json_obj: bool,
}

/// Records of one scanned file.
#[derive(Debug, Default)]
pub struct ScannedMessages {
    pub messages: IndexMap<String, MessageRecord>,
    pub duplicate_keys: IndexSet<String>,
}

#[derive(Debug)]
struct StrToken {
    value: String,
    /// Between the quotes.
    raw: Range<usize>,
    quote: QuoteChar,
    /// Including the quotes.
    span: Range<usize>,
}

#[derive(Debug)]
enum Value {
    Str(StrToken),
    Object(Vec<Entry>, Range<usize>),
    Array(Vec<Value>, Range<usize>),
    Scalar(String, Range<usize>),
}

impl Value {
    fn span(&self) -> Range<usize> {
        match self {
            Value::Str(token) => token.span.clone(),
            Value::Object(_, span) | Value::Array(_, span) | Value::Scalar(_, span) => span.clone(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    key: String,
    key_quote: QuoteChar,
    key_span: Range<usize>,
    value: Value,
    comma: Option<usize>,
    comment: Option<String>,
    line_span: Range<usize>,
    leading_whitespace: String,
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ScanError {
        ScanError {
            message: message.into(),
            offset: self.pos,
        }
    }

    fn unexpected(&self) -> ScanError {
        match self.peek() {
            Some(c) => self.error(format!("Unexpected character {:?}", c)),
            None => self.error("Unexpected end of input"),
        }
    }

    fn skip_inline_space(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    /// Length of the comment starting at the cursor, if any.
    fn comment_len(&self) -> Result<Option<usize>, ScanError> {
        let rest = self.rest();
        if rest.starts_with("//") {
            Ok(Some(rest.find('\n').unwrap_or(rest.len())))
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(end) => Ok(Some(end + 4)),
                None => Err(self.error("Unterminated comment")),
            }
        } else {
            Ok(None)
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ScanError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') => match self.comment_len()? {
                    Some(len) => self.pos += len,
                    None => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, c: char, context: &str) -> Result<(), ScanError> {
        if self.peek() == Some(c) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("Expected {:?} {}", c, context)))
        }
    }

    fn string(&mut self, quote: QuoteChar) -> Result<StrToken, ScanError> {
        let start = self.pos;
        let quote_char = self.bump().unwrap_or('"');
        let raw_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(ScanError {
                        message: "Unterminated string".to_string(),
                        offset: start,
                    });
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if c == quote_char => break,
                Some('\n' | '\r') if quote != QuoteChar::Backtick => {
                    return Err(ScanError {
                        message: "Unterminated string".to_string(),
                        offset: start,
                    });
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let raw = raw_start..self.pos;
        self.bump();
        let value = unescape(&self.text[raw.clone()]).map_err(|(message, offset)| ScanError {
            message,
            offset: raw_start + offset,
        })?;
        Ok(StrToken {
            value,
            raw,
            quote,
            span: start..self.pos,
        })
    }

    fn key(&mut self) -> Result<(String, QuoteChar, Range<usize>), ScanError> {
        if let Some(quote) = self.peek().and_then(QuoteChar::from_char) {
            let token = self.string(quote)?;
            return Ok((token.value, quote, token.span));
        }
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '-'))
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok((
            self.text[start..self.pos].to_string(),
            QuoteChar::Bare,
            start..self.pos,
        ))
    }

    fn value(&mut self) -> Result<Value, ScanError> {
        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some(c) => match QuoteChar::from_char(c) {
                Some(quote) => Ok(Value::Str(self.string(quote)?)),
                None => self.scalar(),
            },
            None => Err(self.unexpected()),
        }
    }

    fn scalar(&mut self) -> Result<Value, ScanError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, ',' | '}' | ']' | '/'))
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(Value::Scalar(
            self.text[start..self.pos].to_string(),
            start..self.pos,
        ))
    }

    fn array(&mut self) -> Result<Value, ScanError> {
        let start = self.pos;
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                break;
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {}
                _ => return Err(self.error("Expected \",\" or \"]\" in array")),
            }
        }
        Ok(Value::Array(items, start..self.pos))
    }

    fn object(&mut self) -> Result<Value, ScanError> {
        let start = self.pos;
        self.bump();
        let mut entries = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            entries.push(self.entry()?);
        }
        Ok(Value::Object(entries, start..self.pos))
    }

    fn entry(&mut self) -> Result<Entry, ScanError> {
        let (key, key_quote, key_span) = self.key()?;
        self.skip_trivia()?;
        self.expect(':', "after key")?;
        self.skip_trivia()?;
        let value = self.value()?;

        self.skip_inline_space();
        let mut comma = None;
        if self.peek() == Some(',') {
            comma = Some(self.pos);
            self.bump();
        } else {
            let before = self.pos;
            self.skip_trivia()?;
            if self.peek() == Some(',') {
                comma = Some(self.pos);
                self.bump();
            } else {
                self.pos = before;
            }
        }
        let mut record_end = self.pos;

        self.skip_inline_space();
        let mut comment = None;
        if let Some(len) = self.comment_len()?
            && !self.rest()[..len].contains('\n')
        {
            comment = Some(self.rest()[..len].to_string());
            self.pos += len;
            record_end = self.pos;
            self.skip_inline_space();
        }
        let newline_end = if self.rest().starts_with("\r\n") {
            Some(self.pos + 2)
        } else if self.rest().starts_with('\n') {
            Some(self.pos + 1)
        } else if self.rest().is_empty() {
            Some(self.pos)
        } else {
            None
        };

        let line_start = self.text[..key_span.start]
            .rfind('\n')
            .map_or(0, |idx| idx + 1);
        let indent = &self.text[line_start..key_span.start];
        let owns_line = indent.chars().all(|c| c == ' ' || c == '\t');
        let line_span = match newline_end {
            Some(end) if owns_line => line_start..end,
            _ => key_span.start..record_end,
        };

        if comma.is_none() {
            self.skip_trivia()?;
            if self.peek() != Some('}') {
                return Err(self.error("Expected \",\" or \"}\" after value"));
            }
        }

        Ok(Entry {
            key,
            key_quote,
            key_span,
            value,
            comma,
            comment,
            line_span,
            leading_whitespace: if owns_line {
                indent.to_string()
            } else {
                String::new()
            },
        })
    }

    fn document(&mut self) -> Result<Vec<Entry>, ScanError> {
        self.skip_trivia()?;
        for prefix in ["module.exports", "export default"] {
            if self.rest().starts_with(prefix) {
                self.pos += prefix.len();
                self.skip_trivia()?;
                if prefix == "module.exports" {
                    self.expect('=', "after module.exports")?;
                    self.skip_trivia()?;
                }
                break;
            }
        }
        if self.peek() != Some('{') {
            return Err(self.error("Expected \"{\" at start of resource"));
        }
        let Value::Object(entries, _) = self.object()? else {
            return Err(self.unexpected());
        };
        self.skip_trivia()?;
        if self.peek() == Some(';') {
            self.bump();
            self.skip_trivia()?;
        }
        if self.peek().is_some() {
            return Err(self.error("Unexpected content after the closing brace"));
        }
        Ok(entries)
    }
}

fn options_from(entries: &[Entry]) -> MessageOptions {
    let mut options = MessageOptions::default();
    for entry in entries {
        match (entry.key.as_str(), &entry.value) {
            ("translated", Value::Scalar(text, _)) => options.translated = text == "true",
            ("sourceHash", Value::Str(token)) => options.source_hash = Some(token.value.clone()),
            _ => {}
        }
    }
    options
}

struct Collector<'a> {
    text: &'a str,
    line_index: Vec<usize>,
    options: ScanOptions,
    out: ScannedMessages,
}

impl Collector<'_> {
    fn collect(&mut self, entries: &[Entry], prefix: &str) {
        for entry in entries {
            let key = if prefix.is_empty() {
                entry.key.clone()
            } else {
                format!("{}.{}", prefix, entry.key)
            };
            match &entry.value {
                Value::Str(token) => {
                    self.record(key, entry, token, MessageOptions::default());
                }
                Value::Array(items, _) => {
                    if let Some(Value::Str(token)) = items.first() {
                        let options = match items.get(1) {
                            Some(Value::Object(fields, _)) => options_from(fields),
                            _ => MessageOptions::default(),
                        };
                        self.record(key, entry, token, options);
                    }
                }
                Value::Object(fields, _) => {
                    let message = fields.iter().find_map(|field| match &field.value {
                        Value::Str(token) if field.key == "message" => Some(token),
                        _ => None,
                    });
                    match message {
                        Some(token) if self.options.json_obj => {
                            self.record(key, entry, token, options_from(fields));
                        }
                        _ => self.collect(fields, &key),
                    }
                }
                Value::Scalar(..) => {}
            }
        }
    }

    fn record(&mut self, key: String, entry: &Entry, token: &StrToken, options: MessageOptions) {
        let body_span = entry.value.span();
        let record = MessageRecord {
            key: key.clone(),
            local_key: entry.key.clone(),
            value: token.value.clone(),
            raw_value: self.text[token.raw.clone()].to_string(),
            key_quote: entry.key_quote,
            value_quote: token.quote,
            comment: entry.comment.clone(),
            comma: entry.comma,
            leading_whitespace: entry.leading_whitespace.clone(),
            span: entry.key_span.start..body_span.end,
            line_span: entry.line_span.clone(),
            key_span: entry.key_span.clone(),
            body_span,
            value_span: token.raw.clone(),
            line: offset_to_line(&self.line_index, entry.key_span.start),
            options,
        };

        match self.out.messages.get_mut(&key) {
            // The first occurrence keeps its place, the last value wins.
            Some(existing) => {
                self.out.duplicate_keys.insert(key);
                existing.value = record.value;
                existing.raw_value = record.raw_value;
                existing.value_quote = record.value_quote;
                existing.value_span = record.value_span;
                existing.body_span = record.body_span;
                existing.options = record.options;
            }
            None => {
                self.out.messages.insert(key, record);
            }
        }
    }
}

/// Scan resource file contents into records.
pub fn scan_resource(text: &str, options: &ScanOptions) -> Result<ScannedMessages, ScanError> {
    let mut scanner = Scanner { text, pos: 0 };
    let entries = scanner.document()?;
    let mut collector = Collector {
        text,
        line_index: build_line_index(text),
        options: *options,
        out: ScannedMessages::default(),
    };
    collector.collect(&entries, "");
    Ok(collector.out)
}

/// Strict JSON check for `.json` files.
fn check_strict_json(contents: &str) -> Option<JsonError> {
    let err = serde_json::from_str::<serde_json::Value>(contents).err()?;
    let message = err.to_string();
    let message = message
        .split(" at line ")
        .next()
        .unwrap_or(&message)
        .to_string();
    Some(JsonError {
        message,
        line: err.line(),
        column: err.column(),
    })
}

/// Read and scan one resource file. Scan failures are kept on the resource.
pub fn load_resource(path: &Path, locale: &str, options: &ScanOptions) -> Result<LocaleResource> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resource file: {:?}", path))?;

    let mut resource = LocaleResource::new(locale, path);
    match scan_resource(&contents, options) {
        Ok(scanned) => {
            resource.messages = scanned.messages;
            resource.duplicate_keys = scanned.duplicate_keys;
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                resource.json_error = check_strict_json(&contents);
            }
        }
        Err(err) => resource.scan_error = Some(err),
    }
    resource.contents = contents;
    Ok(resource)
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.js" -> Some("zh-CN")
/// - ".mfvrc.json" -> None
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    let extension = path.extension()?.to_str()?;
    if !RESOURCE_EXTENSIONS.contains(&extension) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Which locale files of a directory get loaded.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFilter<'a> {
    pub source_locale: &'a str,
    /// `None` loads every file.
    pub locales: Option<&'a [String]>,
}

impl LocaleFilter<'_> {
    pub fn accepts(&self, locale: &str) -> bool {
        locale.eq_ignore_ascii_case(self.source_locale)
            || self.locales.is_none_or(|allowed| {
                allowed
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(locale))
            })
    }
}

/// Load every locale file of `dir` in parallel.
pub fn scan_resource_dir(
    dir: impl AsRef<Path>,
    filter: &LocaleFilter<'_>,
    options: &ScanOptions,
) -> Result<LocaleResources> {
    let dir = dir.as_ref();

    if !dir.exists() {
        bail!(
            "Locale directory '{}' does not exist.\n\
             Hint: Check the 'path' setting in .mfvrc.json.",
            dir.display()
        );
    }
    if !dir.is_dir() {
        bail!("'{}' is not a directory.", dir.display());
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let path = entry?.path();
        if path.is_file()
            && let Some(locale) = extract_locale(&path)
            && filter.accepts(&locale)
        {
            files.push((locale, path));
        }
    }
    files.sort();

    let loaded = files
        .par_iter()
        .map(|(locale, path)| load_resource(path, locale, options))
        .collect::<Result<Vec<_>>>()?;

    Ok(loaded
        .into_iter()
        .map(|resource| (resource.locale.clone(), resource))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn scan(text: &str) -> ScannedMessages {
        scan_resource(text, &ScanOptions::default()).unwrap()
    }

    #[test]
    fn test_scan_json() {
        let text = "{\n  \"a\": \"Hello {name}\",\n  \"b\": \"Say \\\"hi\\\"\"\n}\n";
        let scanned = scan(text);
        let a = &scanned.messages["a"];
        assert_eq!(a.value, "Hello {name}");
        assert_eq!(a.line, 2);
        assert_eq!(a.leading_whitespace, "  ");
        assert!(a.has_comma());
        assert_eq!(a.verbatim(text), "\"a\": \"Hello {name}\"");
        assert_eq!(&text[a.line_span.clone()], "  \"a\": \"Hello {name}\",\n");

        let b = &scanned.messages["b"];
        assert_eq!(b.value, "Say \"hi\"");
        assert_eq!(b.raw_value, "Say \\\"hi\\\"");
        assert!(!b.has_comma());
        assert_eq!(b.key_quote, QuoteChar::Double);
    }

    #[test]
    fn test_scan_surrogate_pair_escapes() {
        let text = r#"{"a": "Smile \ud83d\ude00 {name}", "caf\u00e9": "x"}"#;
        let scanned = scan(text);
        assert_eq!(scanned.messages["a"].value, "Smile \u{1F600} {name}");
        assert!(scanned.messages.contains_key("café"));

        let lone = r#"{"a": "Smile \ud83d {name}"}"#;
        assert!(scan_resource(lone, &ScanOptions::default()).is_err());
    }

    #[test]
    fn test_scan_javascript_module() {
        let text = "module.exports = {\n\t// greeting\n\thello: 'Hi',  // short\n\t`multi`: `a\nb`,\n};\n";
        let scanned = scan(text);
        let hello = &scanned.messages["hello"];
        assert_eq!(hello.key_quote, QuoteChar::Bare);
        assert_eq!(hello.value_quote, QuoteChar::Single);
        assert_eq!(hello.comment.as_deref(), Some("// short"));
        assert_eq!(hello.leading_whitespace, "\t");
        assert_eq!(scanned.messages["multi"].value, "a\nb");
    }

    #[test]
    fn test_scan_nested_and_arrays() {
        let text = r#"export default {
  "nav": { "home": "Home", "deep": { "x": "X" } },
  "same": ["Same", {"translated": true, "sourceHash": "abc="}],
  "count": 3
}"#;
        let scanned = scan(text);
        let keys: Vec<&str> = scanned.messages.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nav.home", "nav.deep.x", "same"]);
        assert_eq!(scanned.messages["nav.home"].local_key, "home");
        let same = &scanned.messages["same"];
        assert!(same.options.translated);
        assert_eq!(same.options.source_hash.as_deref(), Some("abc="));
        assert_eq!(&text[same.value_span.clone()], "Same");
    }

    #[test]
    fn test_scan_json_obj_mode() {
        let text = r#"{"a": {"message": "Hi", "description": "greeting"}}"#;
        let flat = scan(text);
        assert!(flat.messages.contains_key("a.message"));

        let obj = scan_resource(text, &ScanOptions { json_obj: true }).unwrap();
        assert_eq!(obj.messages["a"].value, "Hi");
    }

    #[test]
    fn test_duplicate_keys() {
        let text = "{\n\"a\": \"first\",\n\"b\": \"b\",\n\"a\": \"second\"\n}";
        let scanned = scan(text);
        assert_eq!(scanned.duplicate_keys.len(), 1);
        let a = &scanned.messages["a"];
        assert_eq!(a.line, 2);
        assert_eq!(a.value, "second");
        assert_eq!(scanned.messages.get_index_of("a"), Some(0));
    }

    #[test]
    fn test_scan_errors() {
        let err = scan_resource("{\"a\": \"open\n}", &ScanOptions::default()).unwrap_err();
        assert_eq!(err.message, "Unterminated string");
        assert_eq!(err.offset, 6);

        let err = scan_resource("{\"a\" \"b\"}", &ScanOptions::default()).unwrap_err();
        assert_eq!(err.message, "Expected ':' after key");

        let err = scan_resource("[]", &ScanOptions::default()).unwrap_err();
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_strict_json_warning() {
        assert!(check_strict_json("{\"a\": \"b\"}").is_none());
        let err = check_strict_json("{\"a\": \"b\",\n}").unwrap();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_extract_locale() {
        assert_eq!(extract_locale(Path::new("en.json")), Some("en".to_string()));
        assert_eq!(
            extract_locale(Path::new("/path/to/fr-CA.js")),
            Some("fr-CA".to_string())
        );
        assert_eq!(extract_locale(Path::new(".mfvrc.json")), None);
        assert_eq!(extract_locale(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_scan_resource_dir_filters_locales() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"a": "A"}"#).unwrap();
        fs::write(dir.path().join("fr.json"), r#"{"a": "A fr"}"#).unwrap();
        fs::write(dir.path().join("de.json"), r#"{"a": "#).unwrap();
        fs::write(dir.path().join(".mfvrc.json"), "{}").unwrap();

        let all = scan_resource_dir(
            dir.path(),
            &LocaleFilter {
                source_locale: "en",
                locales: None,
            },
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["de", "en", "fr"]);
        assert!(all["de"].scan_error.is_some());

        let allowed = vec!["fr".to_string()];
        let some = scan_resource_dir(
            dir.path(),
            &LocaleFilter {
                source_locale: "en",
                locales: Some(&allowed),
            },
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(some.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let result = scan_resource_dir(
            dir.path().join("missing"),
            &LocaleFilter {
                source_locale: "en",
                locales: None,
            },
            &ScanOptions::default(),
        );
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}

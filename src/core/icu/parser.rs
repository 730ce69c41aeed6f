//! Recursive descent parser for ICU MessageFormat.
//!
//! Grammar follows the formatjs flavour of ICU: `{name}`, typed arguments,
//! `select`/`plural`/`selectordinal` with option blocks, `<tag>` elements and
//! the `#` token inside plural options. A `'` before a syntax character opens
//! a quoted literal region, `''` is a literal apostrophe.

use super::ast::{
    ArgStyle, ArgumentNode, FormattedNode, LiteralNode, Node, Options, PluralNode, PluralType,
    SelectNode, SelectOption, Span, TagNode,
};
use super::error::{ParseError, ParseErrorKind};
use crate::core::plurals::categories_for;

/// Parser settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions<'a> {
    /// Every select/plural must contain an `other` option.
    pub require_other_clause: bool,
    /// Locale whose plural categories restrict plural keys. `None` accepts any key.
    pub plural_locale: Option<&'a str>,
}

/// Parse with default options (no `other` requirement, any plural key).
pub fn parse(text: &str) -> Result<Vec<Node>, ParseError> {
    parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions<'_>) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser {
        text,
        pos: 0,
        options,
    };
    let nodes = parser.parse_message(0, Parent::None, None)?;
    match parser.peek() {
        None => Ok(nodes),
        Some(_) => Err(parser.expected("end of input")),
    }
}

/// Enclosing construct; decides whether `#` is a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    None,
    Select,
    Plural,
}

struct Parser<'t, 'o> {
    text: &'t str,
    pos: usize,
    options: &'o ParseOptions<'o>,
}

/// Pattern_White_Space. No-break spaces are deliberately not part of it.
fn is_pattern_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{09}'..='\u{0D}' | ' ' | '\u{85}' | '\u{200E}' | '\u{200F}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_identifier_char(c: char) -> bool {
    !is_pattern_whitespace(c) && !matches!(c, '{' | '}' | ',' | '#' | '<' | '>' | '\'')
}

fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

impl<'t> Parser<'t, '_> {
    fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_if(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_pattern_whitespace) {
            self.bump();
        }
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(c) => format!("\"{}\"", c),
            None => "end of input".to_string(),
        }
    }

    fn error_at(&self, kind: ParseErrorKind, message: String, offset: usize) -> ParseError {
        ParseError::new(kind, message, self.text, offset)
    }

    fn expected(&self, what: &str) -> ParseError {
        self.error_at(
            ParseErrorKind::Syntax,
            format!("Expected {} but {} found.", what, self.found()),
            self.pos,
        )
    }

    fn expect_char(&mut self, c: char) -> Result<(), ParseError> {
        if self.peek() == Some(c) {
            self.bump();
            Ok(())
        } else {
            Err(self.expected(&format!("\"{}\"", c)))
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'t str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn parse_message(
        &mut self,
        depth: usize,
        parent: Parent,
        tag: Option<&str>,
    ) -> Result<Vec<Node>, ParseError> {
        let mut nodes: Vec<Node> = Vec::new();

        loop {
            let Some(c) = self.peek() else { break };
            match c {
                '{' => nodes.push(self.parse_argument(depth)?),
                '}' if depth > 0 => break,
                '#' if parent == Parent::Plural => {
                    let start = self.pos;
                    self.bump();
                    nodes.push(Node::Pound(Some(Span::new(start, self.pos))));
                }
                '<' if self.peek_second() == Some('/') => {
                    if tag.is_some() {
                        break;
                    }
                    return Err(self.error_at(
                        ParseErrorKind::Tag,
                        "Unexpected closing tag.".to_string(),
                        self.pos,
                    ));
                }
                '<' if self.peek_second().is_some_and(|c| c.is_alphabetic()) => {
                    nodes.push(self.parse_tag(depth, parent)?);
                }
                _ => {
                    let start = self.pos;
                    let value = self.parse_literal(depth, parent);
                    push_literal(&mut nodes, value, Span::new(start, self.pos));
                }
            }
        }

        Ok(nodes)
    }

    fn is_literal_stop(&self, c: char, depth: usize, parent: Parent) -> bool {
        match c {
            '{' => true,
            '}' => depth > 0,
            '#' => parent == Parent::Plural,
            '<' => self
                .peek_second()
                .is_some_and(|next| next == '/' || next.is_alphabetic()),
            _ => false,
        }
    }

    fn opens_quote(&self, parent: Parent) -> bool {
        match self.peek_second() {
            Some('{' | '}' | '<' | '>') => true,
            Some('#') => parent == Parent::Plural,
            _ => false,
        }
    }

    fn parse_literal(&mut self, depth: usize, parent: Parent) -> String {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == '\'' {
                if self.peek_second() == Some('\'') {
                    value.push('\'');
                    self.pos += 2;
                } else if self.opens_quote(parent) {
                    self.bump();
                    self.parse_quoted(&mut value);
                } else {
                    value.push('\'');
                    self.bump();
                }
                continue;
            }
            if self.is_literal_stop(c, depth, parent) {
                break;
            }
            value.push(c);
            self.bump();
        }

        value
    }

    /// Reads a quoted region after its opening `'`. An unterminated region
    /// runs to the end of the message.
    fn parse_quoted(&mut self, value: &mut String) {
        while let Some(c) = self.bump() {
            if c == '\'' {
                if self.peek() == Some('\'') {
                    value.push('\'');
                    self.bump();
                } else {
                    return;
                }
            } else {
                value.push(c);
            }
        }
    }

    fn parse_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        let name = self.read_while(is_identifier_char);
        if name.is_empty() {
            return Err(self.expected(what));
        }
        Ok(name.to_string())
    }

    fn parse_argument(&mut self, depth: usize) -> Result<Node, ParseError> {
        let start = self.pos;
        self.bump();
        self.skip_whitespace();
        let name = self.parse_identifier("identifier")?;
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.bump();
                return Ok(Node::Argument(ArgumentNode {
                    name,
                    span: Some(Span::new(start, self.pos)),
                }));
            }
            Some(',') => {
                self.bump();
            }
            _ => return Err(self.expected("\",\" or \"}\"")),
        }

        self.skip_whitespace();
        let keyword_start = self.pos;
        let keyword = self.read_while(|c| c.is_ascii_alphabetic());
        match keyword {
            "number" | "date" | "time" => {
                let (style, end) = self.parse_arg_style()?;
                let node = FormattedNode {
                    name,
                    style,
                    span: Some(Span::new(start, end)),
                };
                Ok(match keyword {
                    "number" => Node::Number(node),
                    "date" => Node::Date(node),
                    _ => Node::Time(node),
                })
            }
            "select" => {
                self.skip_whitespace();
                self.expect_char(',')?;
                let options = self.parse_options(depth, &name, None)?;
                self.check_other(&options, "select", &name, start)?;
                Ok(Node::Select(SelectNode {
                    name,
                    options,
                    span: Some(Span::new(start, self.pos)),
                }))
            }
            "plural" | "selectordinal" => {
                let plural_type = if keyword == "plural" {
                    PluralType::Cardinal
                } else {
                    PluralType::Ordinal
                };
                self.skip_whitespace();
                self.expect_char(',')?;
                self.skip_whitespace();
                let offset = if self.bump_if("offset:") {
                    self.skip_whitespace();
                    self.parse_offset()?
                } else {
                    0
                };
                let options = self.parse_options(depth, &name, Some(plural_type))?;
                self.check_other(&options, keyword, &name, start)?;
                Ok(Node::Plural(PluralNode {
                    name,
                    plural_type,
                    offset,
                    options,
                    span: Some(Span::new(start, self.pos)),
                }))
            }
            _ => {
                self.pos = keyword_start;
                Err(self.error_at(
                    ParseErrorKind::Syntax,
                    format!(
                        "Expected \"number\", \"date\", \"time\", \"select\", \"plural\" or \"selectordinal\" but {} found.",
                        if keyword.is_empty() {
                            self.found()
                        } else {
                            format!("\"{}\"", keyword)
                        }
                    ),
                    keyword_start,
                ))
            }
        }
    }

    /// Parses `}` or `, style}` after a number/date/time keyword.
    fn parse_arg_style(&mut self) -> Result<(Option<ArgStyle>, usize), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('}') => {
                self.bump();
                return Ok((None, self.pos));
            }
            Some(',') => {
                self.bump();
            }
            _ => return Err(self.expected("\",\" or \"}\"")),
        }

        self.skip_whitespace();
        let style_start = self.pos;
        let mut nesting = 0usize;
        let mut quoted = false;
        loop {
            match self.peek() {
                None => return Err(self.expected("\"}\"")),
                Some('\'') => quoted = !quoted,
                Some('{') if !quoted => nesting += 1,
                Some('}') if !quoted => {
                    if nesting == 0 {
                        break;
                    }
                    nesting -= 1;
                }
                Some(_) => {}
            }
            self.bump();
        }

        let style = self.text[style_start..self.pos].trim_end();
        if style.is_empty() {
            return Err(self.expected("argument style"));
        }
        self.bump();

        let style = match style.strip_prefix("::") {
            Some(skeleton) => ArgStyle::Skeleton(skeleton.trim().to_string()),
            None => ArgStyle::Named(style.to_string()),
        };
        Ok((Some(style), self.pos))
    }

    fn parse_offset(&mut self) -> Result<i64, ParseError> {
        let start = self.pos;
        self.bump_if("-");
        self.read_while(|c| c.is_ascii_digit());
        self.text[start..self.pos].parse::<i64>().map_err(|_| {
            self.pos = start;
            self.expected("offset value")
        })
    }

    fn parse_plural_key(&mut self) -> Result<String, ParseError> {
        if self.peek() != Some('=') {
            return self.parse_identifier("option key");
        }
        let start = self.pos;
        self.bump();
        let number_start = self.pos;
        self.bump_if("-");
        self.read_while(|c| c.is_ascii_digit() || c == '.');
        if self.text[number_start..self.pos].parse::<f64>().is_err() {
            self.pos = number_start;
            return Err(self.expected("number"));
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn parse_options(
        &mut self,
        depth: usize,
        name: &str,
        plural_type: Option<PluralType>,
    ) -> Result<Options, ParseError> {
        let mut options = Options::new();
        let child_parent = if plural_type.is_some() {
            Parent::Plural
        } else {
            Parent::Select
        };

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') && !options.is_empty() {
                self.bump();
                break;
            }

            let key_start = self.pos;
            let key = match plural_type {
                Some(_) => self.parse_plural_key()?,
                None => self.parse_identifier("option key")?,
            };
            let key_span = Span::new(key_start, self.pos);

            if let Some(plural_type) = plural_type {
                self.check_plural_key(&key, name, plural_type, key_start)?;
            }

            self.skip_whitespace();
            self.expect_char('{')?;
            let value = self.parse_message(depth + 1, child_parent, None)?;
            self.expect_char('}')?;

            if options.contains_key(&key) {
                return Err(self.error_at(
                    ParseErrorKind::DuplicateKey { key: key.clone() },
                    format!("Duplicate option \"{}\" in argument \"{}\".", key, name),
                    key_start,
                ));
            }
            options.insert(
                key,
                SelectOption {
                    value,
                    key_span: Some(key_span),
                },
            );
        }

        Ok(options)
    }

    fn check_plural_key(
        &self,
        key: &str,
        name: &str,
        plural_type: PluralType,
        offset: usize,
    ) -> Result<(), ParseError> {
        let Some(locale) = self.options.plural_locale else {
            return Ok(());
        };
        if key.starts_with('=') {
            return Ok(());
        }
        let categories = categories_for(locale, plural_type);
        if categories.contains(&key) {
            return Ok(());
        }
        let valid = categories
            .iter()
            .map(|c| format!("`{}`", c))
            .collect::<Vec<_>>()
            .join(", ");
        Err(self.error_at(
            ParseErrorKind::InvalidPluralKey {
                key: key.to_string(),
                argument: name.to_string(),
            },
            format!(
                "Invalid key `{}` for argument `{}`. Valid {} keys for this locale are {}, and explicit keys like `=0`.",
                key,
                name,
                plural_type.keyword(),
                valid
            ),
            offset,
        ))
    }

    fn check_other(
        &self,
        options: &Options,
        keyword: &str,
        name: &str,
        start: usize,
    ) -> Result<(), ParseError> {
        if self.options.require_other_clause && !options.contains_key("other") {
            return Err(self.error_at(
                ParseErrorKind::MissingOther,
                format!("Missing \"other\" option in {} argument \"{}\".", keyword, name),
                start,
            ));
        }
        Ok(())
    }

    fn parse_tag(&mut self, depth: usize, parent: Parent) -> Result<Node, ParseError> {
        let start = self.pos;
        self.bump();
        let name = self.read_while(is_tag_name_char).to_string();
        self.skip_whitespace();

        if self.bump_if("/>") {
            return Ok(Node::Literal(LiteralNode {
                value: format!("<{}/>", name),
                span: Some(Span::new(start, self.pos)),
            }));
        }
        self.expect_char('>')?;

        let children = self.parse_message(depth + 1, parent, Some(&name))?;

        let close_start = self.pos;
        if !self.bump_if("</") {
            return Err(self.error_at(
                ParseErrorKind::Tag,
                format!("Unclosed tag \"<{}>\".", name),
                start,
            ));
        }
        let closing = self.read_while(is_tag_name_char);
        if closing != name {
            return Err(self.error_at(
                ParseErrorKind::Tag,
                format!(
                    "Mismatched closing tag \"</{}>\" for \"<{}>\".",
                    closing, name
                ),
                close_start,
            ));
        }
        self.skip_whitespace();
        self.expect_char('>')?;

        Ok(Node::Tag(TagNode {
            name,
            children,
            span: Some(Span::new(start, self.pos)),
        }))
    }
}

fn push_literal(nodes: &mut Vec<Node>, value: String, span: Span) {
    if let Some(Node::Literal(last)) = nodes.last_mut() {
        last.value.push_str(&value);
        if let Some(last_span) = last.span.as_mut() {
            last_span.end = span.end;
        }
        return;
    }
    nodes.push(Node::Literal(LiteralNode {
        value,
        span: Some(span),
    }));
}

//! ICU MessageFormat syntax tree.
//!
//! Nodes produced by the parser carry the byte span they were read from so
//! the validator can point at the offending text. Nodes built by the
//! formatter's transforms have no span.

use std::fmt;

use indexmap::IndexMap;

/// Byte range inside the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralType {
    Cardinal,
    Ordinal,
}

impl PluralType {
    /// Keyword used in message syntax.
    pub fn keyword(self) -> &'static str {
        match self {
            PluralType::Cardinal => "plural",
            PluralType::Ordinal => "selectordinal",
        }
    }
}

impl fmt::Display for PluralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Style of a number, date or time argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgStyle {
    /// `{n, number, percent}`
    Named(String),
    /// `{n, number, ::currency/EUR}`; stored without the leading `::`.
    Skeleton(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Number,
    Date,
    Time,
}

impl FormatKind {
    pub fn keyword(self) -> &'static str {
        match self {
            FormatKind::Number => "number",
            FormatKind::Date => "date",
            FormatKind::Time => "time",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    /// Unescaped text.
    pub value: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentNode {
    pub name: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedNode {
    pub name: String,
    pub style: Option<ArgStyle>,
    pub span: Option<Span>,
}

/// One branch of a select or plural.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: Vec<Node>,
    /// Span of the option key.
    pub key_span: Option<Span>,
}

impl SelectOption {
    pub fn new(value: Vec<Node>) -> Self {
        Self {
            value,
            key_span: None,
        }
    }
}

pub type Options = IndexMap<String, SelectOption>;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    pub name: String,
    pub options: Options,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralNode {
    pub name: String,
    pub plural_type: PluralType,
    pub offset: i64,
    pub options: Options,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub name: String,
    pub children: Vec<Node>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(LiteralNode),
    Argument(ArgumentNode),
    Number(FormattedNode),
    Date(FormattedNode),
    Time(FormattedNode),
    Select(SelectNode),
    Plural(PluralNode),
    Tag(TagNode),
    Pound(Option<Span>),
}

impl Node {
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(LiteralNode {
            value: value.into(),
            span: None,
        })
    }

    pub fn argument(name: impl Into<String>) -> Self {
        Node::Argument(ArgumentNode {
            name: name.into(),
            span: None,
        })
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Literal(n) => n.span,
            Node::Argument(n) => n.span,
            Node::Number(n) | Node::Date(n) | Node::Time(n) => n.span,
            Node::Select(n) => n.span,
            Node::Plural(n) => n.span,
            Node::Tag(n) => n.span,
            Node::Pound(span) => *span,
        }
    }

    /// Argument name referenced by this node, if any.
    pub fn arg_name(&self) -> Option<&str> {
        match self {
            Node::Argument(n) => Some(&n.name),
            Node::Number(n) | Node::Date(n) | Node::Time(n) => Some(&n.name),
            Node::Select(n) => Some(&n.name),
            Node::Plural(n) => Some(&n.name),
            Node::Tag(n) => Some(&n.name),
            Node::Literal(_) | Node::Pound(_) => None,
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self, Node::Select(_) | Node::Plural(_))
    }

    /// True when this node or any descendant is a select or plural.
    pub fn contains_selector(&self) -> bool {
        match self {
            Node::Select(_) | Node::Plural(_) => true,
            Node::Tag(tag) => tag.children.iter().any(Node::contains_selector),
            _ => false,
        }
    }
}

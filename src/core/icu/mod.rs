//! ICU MessageFormat syntax: tree, parser and parse errors.

mod ast;
mod error;
mod parser;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use parser::{ParseOptions, parse, parse_with};

//! Canonical re-serialization of ICU messages.
//!
//! ## Pipeline
//!
//! ```text
//! parse ─→ expand `#` ─→ hoist selectors ─→ plural categories ─→ sort
//!       ─→ argument names ─→ trim ─→ quotes ─→ print
//! ```
//!
//! Every stage takes and returns an owned tree. A message that does not parse
//! is reported on stderr and returned unchanged.

mod args;
mod printer;
mod quotes;
mod transform;

use clap::ValueEnum;
use colored::Colorize;

use crate::core::icu::{ParseError, parse};
use crate::core::structure::extract_structure;

pub use args::ArgCatalog;
pub use printer::{PrintOptions, print_inline, print_message};
pub use quotes::localize_quotes;
pub use transform::{
    CategoryOptions, expand_hashes, hoist_selectors, normalize_plurals, sort_options,
    trim_literals,
};

/// Which quotation marks get localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteMode {
    /// Typographic quotes written in the source language's style.
    Source,
    /// ASCII `'` and `"`.
    Straight,
    Both,
}

#[derive(Debug, Clone)]
pub struct FormatOptions<'a> {
    pub locale: &'a str,
    /// Message key, only used in diagnostics.
    pub key: Option<&'a str>,
    /// Force multi-line output. Otherwise multi-line structure is kept.
    pub newlines: bool,
    pub add: bool,
    pub remove: bool,
    pub dedupe: bool,
    pub trim: bool,
    /// Defaults to `!trim`.
    pub hoist: Option<bool>,
    pub quotes: Option<QuoteMode>,
    /// Replace `#` with the plural's argument where the plural has no offset.
    pub expand_hashes: bool,
    /// Rename a lone illegal plural key into the lone unused legal category.
    pub rename_categories: bool,
    /// Source message whose argument names are canonical.
    pub source: Option<&'a str>,
    /// Indentation (tabs) of the surrounding record.
    pub base_level: usize,
}

impl Default for FormatOptions<'_> {
    fn default() -> Self {
        Self {
            locale: "en",
            key: None,
            newlines: false,
            add: false,
            remove: false,
            dedupe: false,
            trim: false,
            hoist: None,
            quotes: None,
            expand_hashes: false,
            rename_categories: true,
            source: None,
            base_level: 0,
        }
    }
}

/// Format `message`; returns it unchanged when it cannot be parsed.
pub fn format_message(message: &str, options: &FormatOptions<'_>) -> String {
    let nodes = match parse(message) {
        Ok(nodes) => nodes,
        Err(err) => {
            let altered = message.replace("'{", "\u{2019}{");
            match parse(&altered) {
                Ok(nodes) if altered != message => nodes,
                _ => {
                    warn_unparsable(message, &err, options);
                    return message.to_string();
                }
            }
        }
    };

    let nodes = if options.expand_hashes {
        expand_hashes(nodes)
    } else {
        nodes
    };
    let nodes = if options.hoist.unwrap_or(!options.trim) {
        hoist_selectors(nodes)
    } else {
        nodes
    };
    let nodes = normalize_plurals(
        nodes,
        &CategoryOptions {
            locale: options.locale,
            add: options.add,
            remove: options.remove,
            dedupe: options.dedupe,
            rename: options.rename_categories,
        },
    );
    let nodes = sort_options(nodes);
    let nodes = match options.source {
        Some(source) => ArgCatalog::from_source(source).normalize(nodes),
        None => nodes,
    };
    let nodes = if options.trim {
        trim_literals(nodes)
    } else {
        nodes
    };
    let nodes = match options.quotes {
        Some(mode) => localize_quotes(nodes, mode, options.locale),
        None => nodes,
    };

    let newlines =
        options.newlines || (!options.trim && extract_structure(message).contains('\n'));
    print_message(
        &nodes,
        &PrintOptions {
            newlines,
            base_level: options.base_level,
        },
    )
}

fn warn_unparsable(message: &str, err: &ParseError, options: &FormatOptions<'_>) {
    let near_end = message.len().min(err.offset + 4);
    let near = message
        .get(err.offset..near_end)
        .or_else(|| message.get(err.offset..))
        .unwrap_or("");

    eprintln!("{} {}", "warning:".bold().yellow(), err.message);
    eprintln!("  {} {}", "locale:".dimmed(), options.locale);
    if let Some(key) = options.key {
        eprintln!("  {} {}", "key:".dimmed(), key);
    }
    eprintln!("  {} {:?}", "at or near:".dimmed(), near);
}

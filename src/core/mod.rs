//! Core engine: message syntax, locale data and resource files.
//!
//! ## Module Structure
//!
//! - `icu`: ICU MessageFormat tree and parser
//! - `plurals`: CLDR plural categories per locale
//! - `locale_data`: quotation delimiters per locale
//! - `structure`: non-translatable syntax fragments of a raw message
//! - `case_map`: flattened option keys used for cross-locale comparison
//! - `format`: canonical re-serialization of messages
//! - `data`: resource records and locale files
//! - `parsers`: resource file scanner and directory loading
//! - `context`: configuration plus loaded locale directories

pub mod case_map;
pub mod context;
pub mod data;
pub mod format;
pub mod icu;
pub mod locale_data;
pub mod parsers;
pub mod plurals;
pub mod structure;

pub use context::{LocaleDir, ProjectContext};

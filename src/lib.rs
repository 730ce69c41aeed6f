//! mfv - ICU MessageFormat validator for translation resource files
//!
//! mfv checks per-locale message files against a source locale: ICU syntax,
//! argument names, plural and select categories, nesting style and untranslated
//! text. It can also rewrite those files: add missing messages, remove
//! extraneous ones, sort, rename keys and format messages canonically.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and actions)
//! - `config`: Configuration file loading and parsing
//! - `core`: Resource scanning, the ICU parser and the formatter
//! - `issues`: Issue type definitions and totals
//! - `rules`: Validation rules run per message
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;

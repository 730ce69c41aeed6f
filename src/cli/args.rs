//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all mfv commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `validate`: Validate every locale against the source locale (default)
//! - `print-missing`: Print source messages that are missing or untranslated
//! - `add-missing`: Copy missing messages from the source locale
//! - `remove-extraneous`: Remove messages the source locale does not have
//! - `sort`: Sort messages by key, keeping blank-line separated blocks
//! - `rename`: Rename a message key in every locale
//! - `format`: Rewrite messages to the canonical format
//! - `highlight`: Show the ICU structure of one message in every locale
//! - `init`: Initialize the mfv configuration file

use clap::{Args, Parser, Subcommand};

use crate::{config::ConfigOverrides, core::format::QuoteMode};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Glob path to the directories holding locale files (overrides config file)
    #[arg(short, long, global = true)]
    pub path: Option<String>,

    /// Locale the other locales are validated against (overrides config file)
    #[arg(short, long, global = true)]
    pub source_locale: Option<String>,

    /// Process only these comma-separated locales
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub locales: Option<Vec<String>>,

    /// Ignore these comma-separated issue types
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Do not list individual issues, only totals
    #[arg(long, global = true)]
    pub no_issues: bool,

    /// Message values are objects with a `message` field
    #[arg(long, global = true)]
    pub json_obj: bool,

    /// Only accept plural keys that are categories of the target locale
    #[arg(long, global = true)]
    pub strict_plural_keys: bool,

    /// Print issues as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Config values set on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_locale: self.source_locale.clone(),
            locales: self.locales.as_ref().map(|locales| trim_list(locales)),
            path: self.path.clone(),
            json_obj: self.json_obj.then_some(true),
            ignore: self.ignore.as_ref().map(|ignore| trim_list(ignore)),
            strict_plural_keys: self.strict_plural_keys.then_some(true),
        }
    }
}

fn trim_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, Args)]
pub struct FormatArgs {
    /// Use newlines and indentation for nested selectors
    #[arg(short, long)]
    pub newlines: bool,

    /// Add missing plural categories of the locale
    #[arg(short, long)]
    pub add: bool,

    /// Remove plural categories the locale does not have
    #[arg(short, long)]
    pub remove: bool,

    /// Remove options identical to `other`. Takes precedence over --add.
    #[arg(short, long)]
    pub dedupe: bool,

    /// Trim whitespace from both ends of messages. Disables selector hoisting.
    #[arg(short, long)]
    pub trim: bool,

    /// Correct argument names against the source message
    #[arg(short, long)]
    pub correct: bool,

    /// Do not hoist selectors
    #[arg(long, hide = true)]
    pub no_hoist: bool,

    /// Do not rename a lone illegal plural category into the lone unused one
    #[arg(long, hide = true)]
    pub no_rename_categories: bool,

    /// Replace quote characters with locale-appropriate characters
    #[arg(short, long, value_enum)]
    pub quotes: Option<QuoteMode>,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub old_key: String,
    pub new_key: String,
}

#[derive(Debug, Args)]
pub struct HighlightArgs {
    pub key: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every locale against the source locale (default)
    Validate,
    /// Output JSON of all source messages that are missing or untranslated in the target
    PrintMissing,
    /// Add messages that do not exist in the target locale
    AddMissing,
    /// Remove messages that do not exist in the source locale
    RemoveExtraneous,
    /// Sort messages alphabetically by key, maintaining any blocks
    Sort,
    /// Rename a message
    Rename(RenameArgs),
    /// Rewrite messages to a standard format
    Format(FormatArgs),
    /// Output a message with all non-translatable ICU MessageFormat structure highlighted
    Highlight(HighlightArgs),
    /// Initialize a new .mfvrc.json configuration file
    Init,
}

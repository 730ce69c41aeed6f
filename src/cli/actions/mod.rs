//! Actions that rewrite locale files.
//!
//! Actions plan byte-range edits against the scanned records of a file and
//! apply them in one write, so untouched text stays byte-for-byte identical.
//!
//! ## Architecture
//!
//! ```text
//! LocaleResource + input (source locale, rename, format settings)
//!     ↓
//! Action::plan (records → Edits)
//!     ↓
//! FileEdits::write (file modification)
//! ```
//!
//! ## Actions
//!
//! - [`AddMissing`]: Copy missing source records (add-missing)
//! - [`RemoveExtraneous`]: Delete records the source lacks (remove-extraneous)
//! - [`SortRecords`]: Sort records by key, block by block (sort)
//! - [`RenameKey`]: Rename one key (rename)
//! - [`FormatMessages`]: Canonical message format (format)
//!
//! ## Example
//!
//! ```ignore
//! use mfv::cli::actions::{Action, RemoveExtraneous};
//!
//! let targets: Vec<&LocaleResource> = dir.targets().collect();
//! let stats = RemoveExtraneous::run(&targets, source)?;
//! ```

mod add_missing;
mod edit;
mod format_messages;
mod remove_extraneous;
mod rename_key;
mod sort_records;
mod traits;

pub use add_missing::AddMissing;
pub use edit::{Edit, FileChange, FileEdits, apply_edits};
pub use format_messages::{FormatMessages, FormatRequest};
pub use remove_extraneous::RemoveExtraneous;
pub use rename_key::{KeyRename, RenameKey};
pub use sort_records::{SortRecords, compare_keys};
pub use traits::{Action, ActionStats};

#[cfg(test)]
use crate::core::data::LocaleResource;

#[cfg(test)]
pub(crate) fn test_resource(locale: &str, text: &str) -> LocaleResource {
    test_resource_file(&format!("{}.json", locale), text)
}

#[cfg(test)]
pub(crate) fn test_resource_file(file_name: &str, text: &str) -> LocaleResource {
    use crate::core::parsers::{ScanOptions, resource::extract_locale, scan_resource};

    let scanned = scan_resource(text, &ScanOptions::default()).unwrap();
    let mut resource = LocaleResource::new(extract_locale(file_name).unwrap(), file_name);
    resource.messages = scanned.messages;
    resource.duplicate_keys = scanned.duplicate_keys;
    resource.contents = text.to_string();
    resource
}

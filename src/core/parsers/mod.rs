//! Locale resource file parsing.
//!
//! - `escape`: string escapes inside quoted values
//! - `resource`: record scanner and directory loading

pub mod escape;
pub mod resource;

pub use resource::{LocaleFilter, ScanOptions, load_resource, scan_resource, scan_resource_dir};

//! Resource-file data shared by the validator and the corrective commands.

pub mod message;

pub use message::{
    JsonError, LocaleResource, LocaleResources, MessageOptions, MessageRecord, QuoteChar,
    ScanError,
};

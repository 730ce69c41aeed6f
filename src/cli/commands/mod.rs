pub mod add_missing;
mod command_result;
pub mod format;
pub mod helper;
pub mod highlight;
pub mod init;
pub mod print_missing;
pub mod remove_extraneous;
pub mod rename;
pub mod sort;
pub mod validate;

pub use command_result::*;

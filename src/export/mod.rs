//! 職務経歴書 workbook export.

pub mod layout;
pub mod xlsx;

pub use xlsx::{export_to_buffer, export_to_file};

//! Rendering of aligned documents and benchmark reports.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::TextOptions;
pub use text::{report_table, to_text};

//! Rendering module for converting extraction results to output formats.

mod json;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use result::ExtractionStats;
pub use text::{page_to_text, to_text};

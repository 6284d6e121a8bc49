//! HTML extraction module.
//!
//! Turns a wiki page's HTML into [`StructuredContent`](crate::model::StructuredContent):
//! an ordered sequence of text, table and list blocks plus a flattened text
//! blob for indexing. Extraction is pure; missing optional structure (no
//! caption, no header section, no nested list, no container) produces empty
//! values, never errors.

mod content;
mod html;
mod list;
mod options;
mod page;
mod resolve;
mod table;

pub use content::ContentExtractor;
pub use list::{extract_list, extract_list_items};
pub use options::{ExtractOptions, DEFAULT_CONTAINER_SELECTOR};
pub use page::{ExtractedPage, PageExtractor};
pub use resolve::{is_indexable_url, LinkResolver};
pub use table::{extract_table, extract_tables};

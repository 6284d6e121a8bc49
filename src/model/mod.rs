//! Content model types for extracted wiki pages.
//!
//! These are the immutable value trees produced by the extractor: links,
//! lists, tables and the ordered content blocks that tie them together.
//! All types serialize with serde so a page's structure can be persisted or
//! handed to other tools as JSON.

mod content;
mod link;
mod list;
mod table;

pub use content::{BlockBody, BlockKind, ContentBlock, StructuredContent, BLOCK_SEPARATOR};
pub use link::Link;
pub use list::{ListData, ListItem, ListKind, BULLET};
pub use table::{CellContent, CellList, TableData};

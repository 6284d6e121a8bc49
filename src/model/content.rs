//! Ordered content blocks and the structured page result.

use super::{ListData, TableData};
use serde::{Deserialize, Serialize};

/// Separator placed between rendered blocks in the flattened text.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// One ordered unit of linearized page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Document-order position, unique within a page
    pub position: u32,

    /// Block payload
    #[serde(flatten)]
    pub body: BlockBody,
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(position: u32, content: impl Into<String>) -> Self {
        Self {
            position,
            body: BlockBody::Text {
                content: content.into(),
            },
        }
    }

    /// Create a table placeholder block.
    pub fn table(position: u32, table: &TableData) -> Self {
        Self {
            position,
            body: BlockBody::Table {
                id: table.id.clone().unwrap_or_default(),
                text: table.to_text(),
            },
        }
    }

    /// Create a list placeholder block.
    pub fn list(position: u32, list: &ListData) -> Self {
        Self {
            position,
            body: BlockBody::List {
                id: list.id.clone().unwrap_or_default(),
                text: list.to_text(),
            },
        }
    }

    /// The block's kind.
    pub fn kind(&self) -> BlockKind {
        match self.body {
            BlockBody::Text { .. } => BlockKind::Text,
            BlockBody::Table { .. } => BlockKind::Table,
            BlockBody::List { .. } => BlockKind::List,
        }
    }

    /// Rendered text of the block.
    pub fn rendered(&self) -> &str {
        match &self.body {
            BlockBody::Text { content } => content,
            BlockBody::Table { text, .. } | BlockBody::List { text, .. } => text,
        }
    }
}

/// Payload of a content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockBody {
    /// Inline text from a paragraph, heading or bare text node
    Text {
        /// Rendered text
        content: String,
    },

    /// Reference into [`StructuredContent::tables`]
    Table {
        /// Table identifier
        id: String,
        /// Rendered table text
        text: String,
    },

    /// Reference into [`StructuredContent::lists`]
    List {
        /// List identifier
        id: String,
        /// Rendered list text
        text: String,
    },
}

/// Kind discriminant for a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Text block
    Text,
    /// Table block
    Table,
    /// List block
    List,
}

/// Structured content of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredContent {
    /// Flattened text for indexing
    pub text: String,

    /// Blocks in document order
    pub blocks: Vec<ContentBlock>,

    /// Tables referenced by table blocks
    pub tables: Vec<TableData>,

    /// Root lists referenced by list blocks
    pub lists: Vec<ListData>,
}

impl StructuredContent {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result from blocks, sorting them by position and flattening.
    ///
    /// Blocks whose rendered text is blank are kept in `blocks` but skipped
    /// in `text`.
    pub fn from_blocks(
        mut blocks: Vec<ContentBlock>,
        tables: Vec<TableData>,
        lists: Vec<ListData>,
    ) -> Self {
        blocks.sort_by_key(|block| block.position);

        let text = blocks
            .iter()
            .map(ContentBlock::rendered)
            .filter(|rendered| !rendered.trim().is_empty())
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR);

        Self {
            text,
            blocks,
            tables,
            lists,
        }
    }

    /// Create a result holding only raw text (no blocks were found).
    pub fn raw_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Check if no content was extracted.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.blocks.is_empty()
    }

    /// Look up a table by id.
    pub fn table(&self, id: &str) -> Option<&TableData> {
        self.tables.iter().find(|t| t.id.as_deref() == Some(id))
    }

    /// Look up a root list by id.
    pub fn list(&self, id: &str) -> Option<&ListData> {
        self.lists.iter().find(|l| l.id.as_deref() == Some(id))
    }
}

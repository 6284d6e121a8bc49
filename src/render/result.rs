//! Extraction summary statistics.

use serde::{Deserialize, Serialize};

use crate::model::{BlockKind, StructuredContent};

/// Counts describing an extraction result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of content blocks
    pub block_count: u32,

    /// Number of text blocks
    pub text_block_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of root lists
    pub list_count: u32,

    /// Number of list items, nested ones included
    pub list_item_count: u32,

    /// Number of links in tables and lists
    pub link_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute statistics for extracted content.
    pub fn from_content(content: &StructuredContent) -> Self {
        let mut stats = Self {
            block_count: content.blocks.len() as u32,
            table_count: content.tables.len() as u32,
            list_count: content.lists.len() as u32,
            ..Default::default()
        };

        stats.text_block_count = content
            .blocks
            .iter()
            .filter(|b| b.kind() == BlockKind::Text)
            .count() as u32;

        for list in &content.lists {
            stats.list_item_count += list.total_items() as u32;
            stats.link_count += list.total_links() as u32;
        }
        for table in &content.tables {
            stats.link_count += table.link_count() as u32;
        }

        stats.count_text(&content.text);
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.block_count += other.block_count;
        self.text_block_count += other.text_block_count;
        self.table_count += other.table_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.link_count += other.link_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CellContent, ContentBlock, Link, ListData, ListItem, ListKind, TableData,
    };

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_content() {
        let list = ListData::new(
            ListKind::Unordered,
            vec![ListItem::text("a")
                .with_link(Link::new("Docs", "https://kb.example.org/docs"))
                .with_nested(ListData::new(ListKind::Ordered, vec![ListItem::text("b")]))],
        )
        .with_id("list_0");

        let mut table = TableData::new().with_id("table_0").with_headers(["A"]);
        table.add_row(vec![CellContent::text("1").with_link(Link::new("1", "https://x.org/1"))]);

        let blocks = vec![
            ContentBlock::text(0, "Intro"),
            ContentBlock::table(1, &table),
            ContentBlock::list(2, &list),
        ];
        let content = StructuredContent::from_blocks(blocks, vec![table], vec![list]);
        let stats = ExtractionStats::from_content(&content);

        assert_eq!(stats.block_count, 3);
        assert_eq!(stats.text_block_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.link_count, 2);
        assert!(stats.word_count > 0);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats {
            table_count: 2,
            ..Default::default()
        };
        let stats2 = ExtractionStats {
            table_count: 1,
            list_item_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.list_item_count, 4);
    }
}

//! List types.

use super::Link;
use serde::{Deserialize, Serialize};

/// Bullet glyph used for unordered list items.
pub const BULLET: &str = "•";

/// Kind of HTML list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    /// `<ul>`
    #[default]
    #[serde(rename = "ul")]
    Unordered,
    /// `<ol>`
    #[serde(rename = "ol")]
    Ordered,
}

impl ListKind {
    /// Map an element name to a list kind.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "ul" => Some(ListKind::Unordered),
            "ol" => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// The HTML tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    /// Marker for the item at `index` (0-based).
    pub fn marker(self, index: usize) -> String {
        match self {
            ListKind::Ordered => format!("{}.", index + 1),
            ListKind::Unordered => BULLET.to_string(),
        }
    }
}

/// A list with its items, possibly nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListData {
    /// Identifier within the page (`list_N`); nested lists have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Ordered or unordered
    #[serde(rename = "list_type")]
    pub kind: ListKind,

    /// Items in document order
    pub items: Vec<ListItem>,
}

impl ListData {
    /// Create an anonymous list.
    pub fn new(kind: ListKind, items: Vec<ListItem>) -> Self {
        Self {
            id: None,
            kind,
            items,
        }
    }

    /// Set the identifier and return self.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items including all nested levels.
    pub fn total_items(&self) -> usize {
        self.items
            .iter()
            .map(|item| {
                1 + item
                    .nested_list
                    .as_ref()
                    .map(|nested| nested.total_items())
                    .unwrap_or(0)
            })
            .sum()
    }

    /// Total number of links including all nested levels.
    pub fn total_links(&self) -> usize {
        self.items
            .iter()
            .map(|item| {
                item.links.len()
                    + item
                        .nested_list
                        .as_ref()
                        .map(|nested| nested.total_links())
                        .unwrap_or(0)
            })
            .sum()
    }

    /// Render the list as indented text.
    ///
    /// Each item is one line (`marker text`), followed by its direct links as
    /// `- [text](href)` lines, followed by its nested list one level deeper.
    /// Every level indents by two spaces.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        self.write_lines(0, &mut lines);
        lines.join("\n")
    }

    fn write_lines(&self, level: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(level);

        for (idx, item) in self.items.iter().enumerate() {
            let marker = self.kind.marker(idx);
            if item.text.is_empty() {
                lines.push(format!("{}{}", indent, marker));
            } else {
                lines.push(format!("{}{} {}", indent, marker, item.text));
            }

            for link in &item.links {
                lines.push(format!("{}  - {}", indent, link.to_markdown()));
            }

            if let Some(ref nested) = item.nested_list {
                nested.write_lines(level + 1, lines);
            }
        }
    }
}

/// A single list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// The item's own text, excluding link text and nested lists
    pub text: String,

    /// Links that appear directly in this item
    pub links: Vec<Link>,

    /// First nested list of this item, if any
    pub nested_list: Option<ListData>,
}

impl ListItem {
    /// Create an item with text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Add a link and return self.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Attach a nested list and return self.
    pub fn with_nested(mut self, list: ListData) -> Self {
        self.nested_list = Some(list);
        self
    }
}

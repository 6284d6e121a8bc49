//! Table types.

use super::{Link, ListKind, BULLET};
use serde::{Deserialize, Serialize};

/// A table structure extracted from page content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Identifier within the page (`table_N`)
    #[serde(rename = "table_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Table caption
    pub caption: Option<String>,

    /// Header labels
    pub headers: Vec<String>,

    /// Body rows (never includes the row consumed as header)
    pub rows: Vec<Vec<CellContent>>,
}

impl TableData {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier and return self.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the caption and return self.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the headers and return self.
    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: Vec<CellContent>) {
        self.rows.push(row);
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has neither headers nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Number of links across all cells.
    pub fn link_count(&self) -> usize {
        self.rows.iter().flatten().map(|c| c.links.len()).sum()
    }

    /// Render the table as pipe-separated text for indexing.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref caption) = self.caption {
            if !caption.is_empty() {
                lines.push(format!("Table: {}", caption));
            }
        }

        if !self.headers.is_empty() {
            lines.push(self.headers.join(" | "));
        }

        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(CellContent::to_text)
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }

        lines.join("\n")
    }
}

/// Content of a single table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellContent {
    /// Cell text with embedded lists removed
    pub text: String,

    /// Links found anywhere in the cell
    pub links: Vec<Link>,

    /// Lists embedded in the cell
    pub lists: Vec<CellList>,
}

impl CellContent {
    /// Create a cell with text only.
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

    /// Add an embedded list and return self.
    pub fn with_list(mut self, list: CellList) -> Self {
        self.lists.push(list);
        self
    }

    /// Check if the cell carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.links.is_empty() && self.lists.is_empty()
    }

    /// Render the cell for a pipe-joined row.
    ///
    /// A link whose text equals the cell text contributes `(href)`; list items
    /// that match a cell link by text render as `[item](href)`.
    pub fn to_text(&self) -> String {
        let mut parts = Vec::new();

        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }

        for link in &self.links {
            if link.text == self.text {
                parts.push(format!("({})", link.href));
            }
        }

        for list in &self.lists {
            let marker = match list.kind {
                ListKind::Unordered => BULLET,
                ListKind::Ordered => "+",
            };
            for item in &list.items {
                match self.links.iter().find(|link| &link.text == item) {
                    Some(link) => parts.push(format!("{} [{}]({})", marker, item, link.href)),
                    None => parts.push(format!("{} {}", marker, item)),
                }
            }
        }

        parts.join(" ")
    }
}

/// A list inside a table cell, reduced to the text of its items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellList {
    /// Ordered or unordered
    #[serde(rename = "type")]
    pub kind: ListKind,

    /// Item texts in document order
    pub items: Vec<String>,
}

impl CellList {
    /// Create a cell list.
    pub fn new<S: Into<String>>(kind: ListKind, items: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = TableData::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.to_text(), "");
    }

    #[test]
    fn test_table_text() {
        let mut table = TableData::new()
            .with_caption("Servers")
            .with_headers(["Name", "Role"]);
        table.add_row(vec![CellContent::text("alpha"), CellContent::text("db")]);
        table.add_row(vec![CellContent::text("beta"), CellContent::text("")]);

        assert_eq!(
            table.to_text(),
            "Table: Servers\nName | Role\nalpha | db\nbeta | "
        );
    }

    #[test]
    fn test_cell_link_matches_text() {
        let cell = CellContent::text("Foo")
            .with_link(Link::new("Foo", "https://kb.example.org/Foo"))
            .with_link(Link::new("Bar", "https://kb.example.org/Bar"));

        assert_eq!(cell.to_text(), "Foo (https://kb.example.org/Foo)");
    }

    #[test]
    fn test_cell_lists_cross_reference_links() {
        let cell = CellContent::text("")
            .with_link(Link::new("Alpha", "https://kb.example.org/Alpha"))
            .with_list(CellList::new(ListKind::Unordered, ["Alpha", "Beta"]))
            .with_list(CellList::new(ListKind::Ordered, ["Gamma"]));

        assert_eq!(
            cell.to_text(),
            "• [Alpha](https://kb.example.org/Alpha) • Beta + Gamma"
        );
    }

    #[test]
    fn test_cell_is_empty() {
        assert!(CellContent::text("  ").is_empty());
        assert!(!CellContent::text("x").is_empty());
    }
}

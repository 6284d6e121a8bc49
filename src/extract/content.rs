//! Order-preserving structured content walk.

use scraper::ElementRef;

use super::html::{find_first, is_anchor, is_list, is_text_element, normalize_ws, tag, text_of};
use super::list::extract_list;
use super::table::extract_table;
use super::LinkResolver;
use crate::model::{ContentBlock, Link, ListData, StructuredContent, TableData};

/// Walks a content container and linearizes it into ordered blocks.
#[derive(Debug, Clone)]
pub struct ContentExtractor<'r> {
    resolver: &'r LinkResolver,
}

/// Per-walk state threaded through the recursion.
struct Walk<'a> {
    container: ElementRef<'a>,
    position: u32,
    blocks: Vec<ContentBlock>,
    tables: Vec<TableData>,
    lists: Vec<ListData>,
    visited_lists: Vec<ElementRef<'a>>,
}

impl<'a> Walk<'a> {
    fn new(container: ElementRef<'a>) -> Self {
        Self {
            container,
            position: 0,
            blocks: Vec::new(),
            tables: Vec::new(),
            lists: Vec::new(),
            visited_lists: Vec::new(),
        }
    }

    fn next_position(&mut self) -> u32 {
        let position = self.position;
        self.position += 1;
        position
    }

    fn push_text(&mut self, content: String) {
        let position = self.next_position();
        self.blocks.push(ContentBlock::text(position, content));
    }

    fn push_table(&mut self, table: TableData) {
        let table = table.with_id(format!("table_{}", self.tables.len()));
        let position = self.next_position();
        self.blocks.push(ContentBlock::table(position, &table));
        self.tables.push(table);
    }

    fn push_list(&mut self, list: ListData) {
        let list = list.with_id(format!("list_{}", self.lists.len()));
        let position = self.next_position();
        self.blocks.push(ContentBlock::list(position, &list));
        self.lists.push(list);
    }

    /// A list is nested when another list encloses it inside the container.
    fn is_nested_list(&self, list: ElementRef<'a>) -> bool {
        list.ancestors()
            .filter_map(ElementRef::wrap)
            .take_while(|ancestor| *ancestor != self.container)
            .any(|ancestor| is_list(&ancestor))
    }
}

impl<'r> ContentExtractor<'r> {
    /// Create an extractor resolving links with `resolver`.
    pub fn new(resolver: &'r LinkResolver) -> Self {
        Self { resolver }
    }

    /// Extract the structured content of a container element.
    ///
    /// Direct children are visited in document order:
    /// - non-blank text nodes become text blocks;
    /// - `<p>`/`<h1>`..`<h6>` become text blocks, rendered as
    ///   `[text](href)` when they contain a link (first link only);
    /// - `<table>` becomes a table block when it has headers or rows;
    /// - root-level `<ul>`/`<ol>` become list blocks when they have items;
    /// - `<div>` is descended into with the same rules.
    ///
    /// Other elements are ignored. When no block is produced, the
    /// container's full text is used instead. A missing container yields an
    /// empty result.
    pub fn extract(&self, container: Option<ElementRef<'_>>) -> StructuredContent {
        let Some(container) = container else {
            return StructuredContent::new();
        };

        let mut walk = Walk::new(container);
        self.walk_children(container, &mut walk);

        if walk.blocks.is_empty() {
            log::debug!("No content blocks found, falling back to raw container text");
            return StructuredContent::raw_text(text_of(container));
        }

        log::debug!(
            "Extracted {} blocks ({} tables, {} lists)",
            walk.blocks.len(),
            walk.tables.len(),
            walk.lists.len()
        );

        StructuredContent::from_blocks(walk.blocks, walk.tables, walk.lists)
    }

    fn walk_children<'a>(&self, parent: ElementRef<'a>, walk: &mut Walk<'a>) {
        for child in parent.children() {
            if let Some(text) = child.value().as_text() {
                let text = normalize_ws(text);
                if !text.is_empty() {
                    walk.push_text(text);
                }
                continue;
            }

            let Some(el) = ElementRef::wrap(child) else {
                continue;
            };

            if is_text_element(&el) {
                walk.push_text(self.render_text_element(el));
            } else if tag(&el) == "table" {
                if let Some(table) = extract_table(el, self.resolver) {
                    walk.push_table(table);
                }
            } else if is_list(&el) {
                if walk.visited_lists.contains(&el) || walk.is_nested_list(el) {
                    continue;
                }
                walk.visited_lists.push(el);
                if let Some(list) = extract_list(el, self.resolver) {
                    if !list.is_empty() {
                        walk.push_list(list);
                    }
                }
            } else if tag(&el) == "div" {
                self.walk_children(el, walk);
            }
        }
    }

    fn render_text_element(&self, el: ElementRef<'_>) -> String {
        let text = text_of(el);
        match find_first(el, &is_anchor).and_then(|a| a.value().attr("href")) {
            Some(href) => Link::new(text, self.resolver.resolve(href)).to_markdown(),
            None => text,
        }
    }
}

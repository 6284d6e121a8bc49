//! Nested list extraction.

use scraper::ElementRef;

use super::html::{child_elements, is_anchor, is_list, links_excluding, tag, text_excluding};
use super::LinkResolver;
use crate::model::{ListData, ListItem, ListKind};

/// Convert a `<ul>`/`<ol>` element into a list tree.
///
/// Returns `None` when `list` is not a list element.
pub fn extract_list(list: ElementRef<'_>, resolver: &LinkResolver) -> Option<ListData> {
    let kind = ListKind::from_tag(tag(&list))?;
    Some(ListData::new(kind, extract_list_items(list, resolver)))
}

/// Extract the direct `<li>` children of a list element.
///
/// For every item, links and text are taken from the item's own content only;
/// nested lists are excluded from both. The first list that is a direct
/// child of the item becomes its `nested_list`; further child lists are not
/// kept, and lists wrapped in other elements are not followed.
pub fn extract_list_items(list: ElementRef<'_>, resolver: &LinkResolver) -> Vec<ListItem> {
    child_elements(list)
        .filter(|child| tag(child) == "li")
        .map(|li| extract_item(li, resolver))
        .collect()
}

fn extract_item(li: ElementRef<'_>, resolver: &LinkResolver) -> ListItem {
    let nested: Vec<_> = child_elements(li).filter(is_list).collect();
    if nested.len() > 1 {
        log::debug!(
            "List item has {} nested lists, keeping only the first",
            nested.len()
        );
    }

    let links = links_excluding(li, resolver, false, &is_list);
    let text = text_excluding(li, &|el: &ElementRef<'_>| is_list(el) || is_anchor(el));
    let nested_list = nested
        .first()
        .and_then(|first| extract_list(*first, resolver));

    ListItem {
        text,
        links,
        nested_list,
    }
}

//! Tree helpers shared by the list, table and content extractors.
//!
//! Text is collected with explicit subtree exclusion instead of mutating a
//! copy of the tree, so extraction never needs ownership of the document.

use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

use super::LinkResolver;
use crate::model::Link;

/// Element names that hold no readable text.
const SILENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Lower-case element name.
pub(crate) fn tag<'a>(el: &ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// Check for `<ul>` / `<ol>`.
pub(crate) fn is_list(el: &ElementRef<'_>) -> bool {
    matches!(tag(el), "ul" | "ol")
}

/// Check for `<a href=...>`.
pub(crate) fn is_anchor(el: &ElementRef<'_>) -> bool {
    tag(el) == "a" && el.value().attr("href").is_some()
}

/// Check for `<p>` and `<h1>`..`<h6>`.
pub(crate) fn is_text_element(el: &ElementRef<'_>) -> bool {
    matches!(tag(el), "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Direct element children of `el`.
pub(crate) fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Collapse whitespace runs, trim and normalize to NFC.
pub(crate) fn normalize_ws(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.nfc().collect()
}

/// Text of `el`, with whitespace collapsed, skipping any descendant subtree
/// for which `skip` returns true.
///
/// Text nodes are concatenated as-is, so inline markup never splits a word.
pub(crate) fn text_excluding<F>(el: ElementRef<'_>, skip: &F) -> String
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    let mut raw = String::new();
    push_text(el, skip, &mut raw);
    normalize_ws(&raw)
}

/// Full text of `el` with whitespace collapsed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    text_excluding(el, &|_: &ElementRef<'_>| false)
}

fn push_text<F>(el: ElementRef<'_>, skip: &F, raw: &mut String)
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            raw.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if SILENT_ELEMENTS.contains(&tag(&child_el)) || skip(&child_el) {
                continue;
            }
            push_text(child_el, skip, raw);
        }
    }
}

/// Descendant elements of `el` in document order, not descending into
/// subtrees for which `skip` returns true.
pub(crate) fn descendants_excluding<'a, F>(el: ElementRef<'a>, skip: &F) -> Vec<ElementRef<'a>>
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    let mut found = Vec::new();
    push_descendants(el, skip, &mut found);
    found
}

fn push_descendants<'a, F>(el: ElementRef<'a>, skip: &F, found: &mut Vec<ElementRef<'a>>)
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    for child in child_elements(el) {
        if skip(&child) {
            continue;
        }
        found.push(child);
        push_descendants(child, skip, found);
    }
}

/// Outermost descendants of `el` matching `pred`; matches nested inside
/// another match are not returned.
pub(crate) fn outermost<'a, F>(el: ElementRef<'a>, pred: &F) -> Vec<ElementRef<'a>>
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    let mut found = Vec::new();
    for child in child_elements(el) {
        if pred(&child) {
            found.push(child);
        } else {
            found.extend(outermost(child, pred));
        }
    }
    found
}

/// First descendant of `el` matching `pred`, in document order.
pub(crate) fn find_first<'a, F>(el: ElementRef<'a>, pred: &F) -> Option<ElementRef<'a>>
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| pred(candidate))
}

/// Build a [`Link`] from an anchor element.
///
/// With `prefer_label`, the text of the anchor's first `<span>` wins over the
/// anchor's own text when it is not blank.
pub(crate) fn anchor_link(
    anchor: ElementRef<'_>,
    resolver: &LinkResolver,
    prefer_label: bool,
) -> Option<Link> {
    let href = anchor.value().attr("href")?;
    let href = resolver.resolve(href);

    let label = if prefer_label {
        find_first(anchor, &|el: &ElementRef<'_>| tag(el) == "span")
            .map(text_of)
            .filter(|text| !text.is_empty())
    } else {
        None
    };

    let text = label.unwrap_or_else(|| text_of(anchor));
    Some(Link::new(text, href))
}

/// All links inside `el`, skipping subtrees for which `skip` returns true.
pub(crate) fn links_excluding<F>(
    el: ElementRef<'_>,
    resolver: &LinkResolver,
    prefer_label: bool,
    skip: &F,
) -> Vec<Link>
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    // Anchors are leaves here: nested anchors are invalid HTML.
    let mut links = Vec::new();
    for child in child_elements(el) {
        if skip(&child) {
            continue;
        }
        if is_anchor(&child) {
            links.extend(anchor_link(child, resolver, prefer_label));
        } else {
            links.extend(links_excluding(child, resolver, prefer_label, skip));
        }
    }
    links
}

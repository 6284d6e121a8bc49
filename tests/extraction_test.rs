//! Integration tests for page extraction.

use kbharvest::model::{BlockKind, ListKind};
use kbharvest::render::{to_json, JsonFormat};
use kbharvest::{extract_content, extract_page, ExtractionStats, PageExtractor};

const BASE: &str = "https://kb.example.org/wiki/Home";

fn wrap(body: &str) -> String {
    format!(
        "<html><head><title>KB Home</title></head><body><div id=\"nav\"><p>Menu</p></div>\
         <div id=\"page-data\">{}</div></body></html>",
        body
    )
}

#[test]
fn test_order_preserved_across_block_kinds() {
    let html = wrap(
        "<p>Block A</p>\
         <table><tr><th>Key</th><th>Value</th></tr><tr><td>k</td><td>v</td></tr></table>\
         <p>Block B</p>",
    );
    let content = extract_content(&html, BASE).unwrap();

    assert_eq!(content.text, "Block A\n\nKey | Value\nk | v\n\nBlock B");
    let kinds: Vec<_> = content.blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec![BlockKind::Text, BlockKind::Table, BlockKind::Text]);
}

#[test]
fn test_content_outside_container_ignored() {
    let content = extract_content(&wrap("<p>Inside</p>"), BASE).unwrap();
    assert_eq!(content.text, "Inside");
}

#[test]
fn test_nested_list_rendering() {
    let html = wrap("<ul><li>a<ul><li>b</li></ul></li></ul>");
    let content = extract_content(&html, BASE).unwrap();

    assert_eq!(content.lists.len(), 1);
    let list = &content.lists[0];
    assert_eq!(list.id.as_deref(), Some("list_0"));
    assert_eq!(list.kind, ListKind::Unordered);
    assert_eq!(list.items[0].text, "a");
    assert_eq!(list.items[0].nested_list.as_ref().unwrap().items[0].text, "b");

    let lines: Vec<&str> = content.text.lines().collect();
    assert_eq!(lines, vec!["• a", "  • b"]);
}

#[test]
fn test_ordered_list_markers_and_links() {
    let html = wrap(
        r#"<ol><li>Install <a href="tiki-index.php?page=Client">client</a></li><li>Connect</li></ol>"#,
    );
    let content = extract_content(&html, BASE).unwrap();

    assert_eq!(
        content.text,
        "1. Install\n  - [client](https://kb.example.org/wiki/tiki-index.php?page=Client)\n2. Connect"
    );
}

#[test]
fn test_relative_link_resolution() {
    let html = wrap(r#"<p><a href="tiki-index.php?page=Foo">Foo</a></p>"#);
    let content = extract_content(&html, BASE).unwrap();
    assert_eq!(
        content.text,
        "[Foo](https://kb.example.org/wiki/tiki-index.php?page=Foo)"
    );
}

#[test]
fn test_table_without_header_section() {
    let html = wrap("<table><tr><td>A</td><td>B</td></tr><tr><td>1</td><td>2</td></tr></table>");
    let content = extract_content(&html, BASE).unwrap();

    let table = content.table("table_0").unwrap();
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.rows.len(), 1);
    let row: Vec<_> = table.rows[0].iter().map(|c| c.text.as_str()).collect();
    assert_eq!(row, vec!["1", "2"]);
}

#[test]
fn test_extract_page_title_and_stats() {
    let html = wrap(
        r#"<h1>Printers</h1>
           <ul><li>Floor 1<ul><li>HP</li></ul></li><li><a href="/Canon">Canon</a></li></ul>
           <table><tr><th>Name</th></tr><tr><td><a href="/Lab">Lab</a></td></tr></table>"#,
    );
    let page = extract_page("https://kb.example.org/wiki/Printers", &html, BASE).unwrap();
    assert_eq!(page.title, "KB Home");

    let stats = ExtractionStats::from_content(&page.content);
    assert_eq!(stats.text_block_count, 1);
    assert_eq!(stats.list_count, 1);
    assert_eq!(stats.list_item_count, 3);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.link_count, 2);
}

#[test]
fn test_extractor_reused_across_threads() {
    let extractor = PageExtractor::new(BASE).unwrap();
    let pages: Vec<String> = (0..8).map(|i| wrap(&format!("<p>Page {}</p>", i))).collect();

    std::thread::scope(|scope| {
        for (i, html) in pages.iter().enumerate() {
            let extractor = &extractor;
            scope.spawn(move || {
                let content = extractor.extract_content(html);
                assert_eq!(content.text, format!("Page {}", i));
            });
        }
    });
}

#[test]
fn test_json_structure() {
    let html = wrap("<p>Intro</p><ul><li>x</li></ul>");
    let content = extract_content(&html, BASE).unwrap();

    let json = to_json(&content, JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""type":"list""#));
    assert!(json.contains(r#""id":"list_0""#));
    assert!(json.contains(r#""list_type":"ul""#));

    let back: kbharvest::StructuredContent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, content);
}

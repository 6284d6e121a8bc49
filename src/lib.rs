//! # kbharvest
//!
//! Knowledge-base page extraction and corpus statistics for Rust.
//!
//! This library turns wiki pages into structured, ordered content (text,
//! tables and lists with resolved links) and flattened text for indexing,
//! and maintains incremental term statistics (df, tf, idf, stop terms,
//! acronyms) across the corpus.
//!
//! ## Quick Start
//!
//! ```
//! use kbharvest::{extract_page, stats::CorpusStats};
//!
//! fn main() -> kbharvest::Result<()> {
//!     let html = r#"<html><head><title>VPN</title></head><body>
//!         <div id="page-data"><p>Install the VPN client.</p></div>
//!     </body></html>"#;
//!
//!     let page = extract_page("https://kb.example.org/wiki/VPN", html, "https://kb.example.org/wiki/")?;
//!     assert_eq!(page.content.text, "Install the VPN client.");
//!
//!     let mut stats = CorpusStats::new();
//!     stats.consume(&page.title, &page.content.text, None);
//!     assert_eq!(stats.doc_count(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Order-preserving extraction**: text, tables and lists in document order
//! - **Nested lists and rich table cells**: links and lists inside cells
//! - **Link resolution**: relative hrefs joined against the page base URL
//! - **Corpus statistics**: df/tf/idf, title and keyword hits, stop terms
//! - **Atomic persistence**: JSON snapshot and spell-correction dictionary
//! - **Parallel ingestion**: Rayon extraction feeding a single statistics writer

pub mod error;
pub mod extract;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{is_indexable_url, ExtractOptions, ExtractedPage, LinkResolver, PageExtractor};
pub use index::IndexDocument;
pub use model::{
    BlockKind, CellContent, ContentBlock, Link, ListData, ListItem, ListKind, StructuredContent,
    TableData,
};
pub use pipeline::{read_keyword_map, PageInput, Pipeline, PipelineOptions, PipelineOutput};
pub use render::{ExtractionStats, JsonFormat};
pub use stats::{CorpusStats, SimpleAnalyzer, StatsOptions, StatsSnapshot, TextAnalyzer};

use std::path::Path;

/// Extract a page's title and structured content.
///
/// # Arguments
///
/// * `url` - URL the page was fetched from
/// * `html` - Full HTML document
/// * `base_url` - Base URL for resolving relative links
///
/// # Example
///
/// ```
/// use kbharvest::extract_page;
///
/// let page = extract_page(
///     "https://kb.example.org/wiki/Home",
///     r#"<div id="page-data"><a href="tiki-index.php?page=Foo">Foo</a></div>"#,
///     "https://kb.example.org/wiki/Home",
/// ).unwrap();
/// assert_eq!(page.title, "https://kb.example.org/wiki/Home");
/// ```
pub fn extract_page(url: &str, html: &str, base_url: &str) -> Result<ExtractedPage> {
    let extractor = PageExtractor::new(base_url)?;
    Ok(extractor.extract_page(url, html))
}

/// Extract a page with custom options.
pub fn extract_page_with_options(
    url: &str,
    html: &str,
    base_url: &str,
    options: ExtractOptions,
) -> Result<ExtractedPage> {
    let extractor = PageExtractor::with_options(base_url, options)?;
    Ok(extractor.extract_page(url, html))
}

/// Extract only the structured content of a page.
pub fn extract_content(html: &str, base_url: &str) -> Result<StructuredContent> {
    let extractor = PageExtractor::new(base_url)?;
    Ok(extractor.extract_content(html))
}

/// Extract a page from an HTML file on disk.
///
/// The page URL is taken to be the base URL joined with the file name.
pub fn extract_file<P: AsRef<Path>>(path: P, base_url: &str) -> Result<ExtractedPage> {
    let path = path.as_ref();
    let html = std::fs::read_to_string(path)?;
    let extractor = PageExtractor::new(base_url)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let url = extractor.resolver().resolve(&name);

    Ok(extractor.extract_page(&url, &html))
}

/// Load corpus statistics from a state directory with default options.
///
/// A directory without a snapshot yields empty statistics; a corrupt
/// snapshot is an error.
pub fn load_stats<P: AsRef<Path>>(dir: P) -> Result<CorpusStats> {
    CorpusStats::load(dir.as_ref(), SimpleAnalyzer::new(), StatsOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_page() {
        let html = r#"<html><head><title>Home</title></head><body>
            <div id="page-data"><p>Hello</p><ul><li>one</li><li>two</li></ul></div>
            </body></html>"#;
        let page = extract_page("https://kb.example.org/Home", html, "https://kb.example.org/").unwrap();

        assert_eq!(page.title, "Home");
        assert_eq!(page.content.text, "Hello\n\n• one\n• two");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = extract_content("<p>x</p>", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Home.html");
        std::fs::write(&path, r#"<div id="page-data"><p>Body</p></div>"#).unwrap();

        let page = extract_file(&path, "https://kb.example.org/wiki/").unwrap();
        assert_eq!(page.url, "https://kb.example.org/wiki/Home.html");
        assert_eq!(page.content.text, "Body");
    }

    #[test]
    fn test_load_stats_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let stats = load_stats(dir.path()).unwrap();
        assert_eq!(stats.doc_count(), 0);
    }
}

//! Whole-page extraction.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::content::ContentExtractor;
use super::html::text_of;
use super::options::ExtractOptions;
use super::LinkResolver;
use crate::error::{Error, Result};
use crate::model::StructuredContent;

/// A page after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Page URL
    pub url: String,

    /// Page title (possibly the URL, see [`ExtractOptions::title_fallback_to_url`])
    pub title: String,

    /// Structured content of the page's content container
    pub content: StructuredContent,
}

/// Extracts wiki pages that share a base URL.
///
/// The extractor is immutable and can be shared across threads; every call
/// parses its own document.
#[derive(Debug)]
pub struct PageExtractor {
    resolver: LinkResolver,
    container: Selector,
    title: Selector,
    options: ExtractOptions,
}

impl PageExtractor {
    /// Create an extractor with default options.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, ExtractOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(base_url: &str, options: ExtractOptions) -> Result<Self> {
        let resolver = LinkResolver::parse(base_url)?;
        let container = parse_selector(&options.container_selector)?;
        let title = parse_selector("title")?;

        Ok(Self {
            resolver,
            container,
            title,
            options,
        })
    }

    /// The link resolver used for this base URL.
    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract title and structured content from a full HTML document.
    pub fn extract_page(&self, url: &str, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        let mut title = document
            .select(&self.title)
            .next()
            .map(text_of)
            .unwrap_or_default();
        if title.is_empty() && self.options.title_fallback_to_url {
            title = url.to_string();
        }

        let content = self.extract_document(&document);
        if content.is_empty() {
            log::warn!("No content found in {} (selector {:?})", url, self.options.container_selector);
        }

        ExtractedPage {
            url: url.to_string(),
            title,
            content,
        }
    }

    /// Extract only the structured content of an HTML document.
    pub fn extract_content(&self, html: &str) -> StructuredContent {
        self.extract_document(&Html::parse_document(html))
    }

    fn extract_document(&self, document: &Html) -> StructuredContent {
        let container = document.select(&self.container).next();
        ContentExtractor::new(&self.resolver).extract(container)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector(format!("{}: {}", selector, e)))
}

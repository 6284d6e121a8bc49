//! Extraction options and configuration.

/// Default selector for the content container of a wiki page.
pub const DEFAULT_CONTAINER_SELECTOR: &str = "div#page-data";

/// Options for extracting wiki pages.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// CSS selector of the element holding the page content
    pub container_selector: String,

    /// Use the page URL as title when `<title>` is missing or blank
    pub title_fallback_to_url: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content container selector.
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Enable or disable the URL title fallback.
    pub fn with_title_fallback(mut self, fallback: bool) -> Self {
        self.title_fallback_to_url = fallback;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            title_fallback_to_url: true,
        }
    }
}

//! Hyperlink types.

use serde::{Deserialize, Serialize};

/// A hyperlink found in page content.
///
/// `href` is always stored after resolution against the page's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display text (the resolved URL when the anchor has no text)
    pub text: String,

    /// Absolute link target
    pub href: String,
}

impl Link {
    /// Create a link, falling back to the href as display text when `text` is blank.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        let text = text.into();
        let text = if text.trim().is_empty() {
            href.clone()
        } else {
            text
        };
        Self { text, href }
    }

    /// Render as a Markdown-style inline link.
    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.text, self.href)
    }
}

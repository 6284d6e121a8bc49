//! Documents handed to the search index.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::extract::ExtractedPage;

/// Separator used when joining keywords into a single field.
pub const KEYWORD_SEPARATOR: &str = ", ";

/// A page ready to be upserted into a search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Lowercase hex MD5 of the URL
    pub id: String,

    /// Page URL
    pub url: String,

    /// Page title, the URL when the page has none
    pub title: String,

    /// Flattened page text
    pub content: String,

    /// Optional summary
    #[serde(default)]
    pub summary: String,

    /// Keywords joined with `", "`
    #[serde(default)]
    pub keywords: String,

    /// Time of indexing
    pub indexed_at: DateTime<Utc>,
}

impl IndexDocument {
    /// Build a document from an extracted page, stamped with the current time.
    pub fn from_page(page: &ExtractedPage, summary: Option<&str>, keywords: &[String]) -> Self {
        Self::from_page_at(page, summary, keywords, Utc::now())
    }

    /// Build a document from an extracted page with an explicit timestamp.
    pub fn from_page_at(
        page: &ExtractedPage,
        summary: Option<&str>,
        keywords: &[String],
        indexed_at: DateTime<Utc>,
    ) -> Self {
        let title = if page.title.trim().is_empty() {
            page.url.clone()
        } else {
            page.title.clone()
        };

        Self {
            id: document_id(&page.url),
            url: page.url.clone(),
            title,
            content: page.content.text.clone(),
            summary: summary.unwrap_or_default().to_string(),
            keywords: keywords.join(KEYWORD_SEPARATOR),
            indexed_at,
        }
    }

    /// Keywords split back into a list.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .split(KEYWORD_SEPARATOR)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Stable document id for a URL.
pub fn document_id(url: &str) -> String {
    format!("{:x}", Md5::digest(url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuredContent;
    use chrono::TimeZone;

    fn page(title: &str) -> ExtractedPage {
        ExtractedPage {
            url: "https://kb.example.org/wiki/Home".to_string(),
            title: title.to_string(),
            content: StructuredContent::raw_text("Body"),
        }
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(document_id("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_from_page() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let keywords = vec!["VPN".to_string(), "remote access".to_string()];
        let doc = IndexDocument::from_page_at(&page("Home"), Some("Start page"), &keywords, at);

        assert_eq!(doc.id, document_id("https://kb.example.org/wiki/Home"));
        assert_eq!(doc.title, "Home");
        assert_eq!(doc.content, "Body");
        assert_eq!(doc.summary, "Start page");
        assert_eq!(doc.keywords, "VPN, remote access");
        assert_eq!(doc.keyword_list(), vec!["VPN", "remote access"]);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"indexed_at\":\"2024-05-01T12:00:00Z\""));
    }

    #[test]
    fn test_title_fallback() {
        let doc = IndexDocument::from_page(&page("  "), None, &[]);
        assert_eq!(doc.title, "https://kb.example.org/wiki/Home");
        assert_eq!(doc.summary, "");
        assert_eq!(doc.keywords, "");
        assert!(doc.keyword_list().is_empty());
    }
}

//! Link target resolution and URL filtering.

use url::Url;

use crate::error::{Error, Result};

/// Resolves link targets against a page's base URL.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Url,
}

impl LinkResolver {
    /// Create a resolver from an already parsed base URL.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Parse a base URL string.
    pub fn parse(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self::new(base))
    }

    /// The base URL links are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve an href to an absolute URL.
    ///
    /// Absolute `http(s)` targets are kept verbatim, protocol-relative
    /// targets get the `https:` scheme, and everything else is joined onto
    /// the base URL. A target that cannot be joined is returned unchanged.
    pub fn resolve(&self, href: &str) -> String {
        let href = href.trim();

        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }

        if href.starts_with("//") {
            return format!("https:{}", href);
        }

        match self.base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::debug!("Cannot resolve href {:?} against {}: {}", href, self.base, e);
                href.to_string()
            }
        }
    }
}

/// Check whether a page URL should be fetched and indexed.
///
/// Print views and PDF exports of wiki pages are rejected, as is anything
/// that is not an `http`/`https` URL with a host.
pub fn is_indexable_url(url: &str) -> bool {
    if url.ends_with("&display=pdf") || url.contains("tiki-print.php") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

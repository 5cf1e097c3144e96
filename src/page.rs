//! Host page loading.
//!
//! The board renders into a container element inside a host HTML page. The
//! page can come from an in-memory string, a file, or (with the `remote`
//! feature) an HTTP URL fetched with a blocking client.

use std::path::Path;

use crate::dom::Document;
#[cfg(feature = "remote")]
use crate::ViewConfig;
use crate::{Error, Result};

/// Minimal built-in host page with an empty chessboard container.
pub const DEFAULT_PAGE: &str = "<html><head><title>boardview</title></head>\
<body><div class=\"chessboard\"></div></body></html>";

/// A loaded host page: the parsed document plus its origin URL when it was
/// fetched over HTTP.
#[derive(Debug, Clone)]
pub struct Page {
    pub doc: Document,
    pub url: Option<String>,
}

impl Page {
    /// Parse a page from an HTML string. Parsing never fails: the parser
    /// always produces a document skeleton, and whether the page actually
    /// carries a board container is checked at attach time.
    pub fn from_html(html: &str) -> Self {
        Self {
            doc: Document::parse(html),
            url: None,
        }
    }

    /// Read and parse a page from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .map_err(|e| Error::PageError(format!("read {}: {}", path.display(), e)))?;
        Ok(Self::from_html(&html))
    }

    /// Fetch and parse a page over HTTP, using the configured timeout.
    #[cfg(feature = "remote")]
    pub fn fetch(url: &str, config: &ViewConfig) -> Result<Self> {
        use std::time::Duration;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;
        let resp = client
            .get(url)
            .send()
            .map_err(|e| Error::PageError(format!("Failed to fetch {}: {}", url, e)))?;
        let body = resp
            .text()
            .map_err(|e| Error::PageError(format!("Failed to read response body: {}", e)))?;

        let mut page = Self::from_html(&body);
        page.url = Some(url.to_string());
        log::info!("loaded host page from {}", url);
        Ok(page)
    }
}

/// Resolve a possibly relative asset base against the page URL, so image
/// sources stay addressable when the page came from the network. Falls back
/// to the base as given when no resolution is possible.
#[cfg(feature = "remote")]
pub fn resolve_asset_base(page_url: &str, asset_base: &str) -> String {
    match url::Url::parse(page_url) {
        // join() treats "./img" as a sibling; append a slash so trailing
        // segments survive
        Ok(base) => base
            .join(&format!("{}/", asset_base.trim_end_matches('/')))
            .map(|u| u.to_string().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| asset_base.to_string()),
        Err(_) => asset_base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_has_a_container() {
        let page = Page::from_html(DEFAULT_PAGE);
        assert!(page.doc.element_by_class("chessboard").is_some());
        assert!(page.url.is_none());
    }

    #[test]
    fn any_input_parses_to_a_document() {
        // the parser builds a skeleton even from garbage; the missing
        // container surfaces at attach time instead
        let page = Page::from_html("not <html at all");
        assert!(!page.doc.is_empty());
        match crate::BoardView::attach(page.doc, crate::ViewConfig::default()) {
            Err(Error::MissingContainer(class)) => assert_eq!(class, "chessboard"),
            other => panic!("expected MissingContainer, got {:?}", other.map(|_| ())),
        }
    }

    #[cfg(feature = "remote")]
    #[test]
    fn asset_base_resolves_against_page_url() {
        let resolved = resolve_asset_base("http://localhost:8000/play/index.html", "./img");
        assert_eq!(resolved, "http://localhost:8000/play/img");
    }

    #[cfg(feature = "remote")]
    #[test]
    fn unparseable_page_url_keeps_the_base() {
        assert_eq!(resolve_asset_base("not a url", "./img"), "./img");
    }
}

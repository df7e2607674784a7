//! Page input.
//!
//! The tracker never owns the host page; it asks a `PageSource` for a fresh
//! capture of the markup whenever it scans.

use std::sync::{Arc, RwLock};

use dom_query::{Document, Selection};

use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::normalize;
use crate::patterns::TITLE_SELECTOR;

/// Captured markup of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Address of the page; also the base for relative links.
    pub url: String,

    /// Serialized HTML at capture time.
    pub html: String,
}

impl Page {
    /// Create a page capture.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Source of the current page markup.
pub trait PageSource: Send + Sync {
    /// Capture the page as it is now.
    fn capture(&self) -> Result<Page>;
}

/// A page held in memory whose markup can be replaced.
///
/// Clones share the same page, so one clone can be handed to a refresh loop
/// while another mutates it.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    inner: Arc<RwLock<Page>>,
}

impl StaticPage {
    /// Wrap a page.
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            inner: Arc::new(RwLock::new(page)),
        }
    }

    /// Replace the markup, keeping the URL.
    pub fn set_html(&self, html: impl Into<String>) -> Result<()> {
        let mut page = self
            .inner
            .write()
            .map_err(|_| Error::Capture("page lock poisoned".to_string()))?;
        page.html = html.into();
        Ok(())
    }
}

impl PageSource for StaticPage {
    fn capture(&self) -> Result<Page> {
        self.inner
            .read()
            .map(|page| page.clone())
            .map_err(|_| Error::Capture("page lock poisoned".to_string()))
    }
}

/// Normalized `<title>` text of a document, empty when there is none.
#[must_use]
pub fn page_title(doc: &Document) -> String {
    doc.select(TITLE_SELECTOR)
        .nodes()
        .first()
        .map(|node| normalize(&dom::text_content(&Selection::from(*node))))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_page_shares_updates() {
        let page = StaticPage::new(Page::new("https://example.org/a", "<p>old</p>"));
        let other = page.clone();

        other.set_html("<p>new</p>").unwrap();

        let captured = page.capture().unwrap();
        assert_eq!(captured.url, "https://example.org/a");
        assert_eq!(captured.html, "<p>new</p>");
    }

    #[test]
    fn test_page_title() {
        let doc = dom::parse("<html><head><title>  A   Paper\n</title></head><body></body></html>");
        assert_eq!(page_title(&doc), "A Paper");

        let doc = dom::parse("<p>untitled</p>");
        assert_eq!(page_title(&doc), "");
    }
}

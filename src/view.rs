//! Helpers for presenting references.
//!
//! Nothing here touches the page; these operate on scan results and
//! snapshots the way a reference list popup would.

use crate::error::Result;
use crate::result::{PageSnapshot, Reference};
use crate::store::SnapshotStore;
use crate::url_utils::page_key;

/// URL schemes of pages that cannot be scanned.
const UNTRACKABLE_PREFIXES: &[&str] = &["chrome://", "chrome-extension://", "edge://", "about:"];

/// Link URLs of a set of references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSummary {
    /// URLs in reference order, for references that have a link.
    pub urls: Vec<String>,

    /// Number of references considered, with or without a link.
    pub total: usize,
}

impl UrlSummary {
    /// Whether some references had no link.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.urls.len() < self.total
    }
}

/// References whose text or identifier contains `term`, ignoring case.
///
/// An empty term keeps everything. The term is not trimmed, so surrounding
/// spaces must match too.
#[must_use]
pub fn filter_references<'a>(references: &'a [Reference], term: &str) -> Vec<&'a Reference> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return references.iter().collect();
    }

    references
        .iter()
        .filter(|reference| {
            reference.text.to_lowercase().contains(&term)
                || reference
                    .identifier
                    .as_deref()
                    .is_some_and(|id| id.to_lowercase().contains(&term))
        })
        .collect()
}

/// Plain-text rendering of all references, separated by blank lines.
///
/// A link URL is appended on its own line unless the text already contains it.
#[must_use]
pub fn format_all(references: &[Reference]) -> String {
    references
        .iter()
        .map(|reference| match reference.url() {
            Some(url) if !reference.text.contains(url) => format!("{}\n{url}", reference.text),
            _ => reference.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collect the link URLs of `references`.
#[must_use]
pub fn collect_urls(references: &[Reference]) -> UrlSummary {
    UrlSummary {
        urls: references
            .iter()
            .filter_map(Reference::url)
            .map(str::to_string)
            .collect(),
        total: references.len(),
    }
}

/// Whether a page can be scanned at all. Browser-internal pages cannot.
#[must_use]
pub fn is_trackable_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !UNTRACKABLE_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Last stored snapshot for a page, if any.
pub fn load_cached(store: &dyn SnapshotStore, page_url: &str) -> Result<Option<PageSnapshot>> {
    store.load(&page_key(page_url))
}

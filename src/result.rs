//! Result types for reference scanning.
//!
//! This module defines the records produced by a scan and the snapshot
//! persisted for each page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best hyperlink associated with a reference.
///
/// `url` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute link target (or the raw `href` when no page URL is known).
    pub url: String,

    /// Link label, or the bare identifier for links built from free text.
    pub text: String,
}

/// One extracted citation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Stable id derived from the first characters of `text`.
    pub id: String,

    /// 1-based position within the scan that produced it.
    pub index: usize,

    /// Normalized display text.
    pub text: String,

    /// Best associated hyperlink, if any.
    pub link: Option<Link>,

    /// DOI-like identifier from structured data or a resolver link.
    #[serde(alias = "doi")]
    pub identifier: Option<String>,

    /// Extraction time, as epoch milliseconds on the wire.
    #[serde(alias = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,
}

impl Reference {
    /// URL of the associated link, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.link.as_ref().map(|l| l.url.as_str())
    }
}

/// Ordered references from a single scan.
///
/// Texts are pairwise distinct and every entry came from the same matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Accepted references in document order, indexed 1..N.
    pub references: Vec<Reference>,

    /// The matcher that produced the references; `None` when nothing matched.
    pub matcher: Option<String>,
}

impl ScanResult {
    /// Number of references found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether the scan found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Iterate the references in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Reference> {
        self.references.iter()
    }

    /// Take the references out of the result.
    #[must_use]
    pub fn into_references(self) -> Vec<Reference> {
        self.references
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a Reference;
    type IntoIter = std::slice::Iter<'a, Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.references.iter()
    }
}

/// Persisted record of the most recent accepted scan of a page.
///
/// Overwritten wholesale on every accepted change; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// References of the accepted scan.
    pub references: Vec<Reference>,

    /// When the snapshot was written, as epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_update: DateTime<Utc>,

    /// URL of the page.
    pub page_url: String,

    /// Document title of the page.
    pub page_title: String,
}

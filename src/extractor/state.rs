//! Scan state tracking.
//!
//! This module provides `ScanState`, the per-scan bookkeeping shared by the
//! entry builder: texts already accepted, the noise threshold and the base
//! URL used to resolve hyperlinks.

use std::collections::HashSet;

use url::Url;

use crate::extractor::text::text_len;
use crate::options::{Options, ID_PREFIX_LEN, MIN_TEXT_LEN};
use crate::url_utils;

/// Tracks state for one scan of one page.
///
/// # Purpose
///
/// - **Seen texts**: a text accepted once is rejected for the rest of the
///   scan, so the first occurrence wins
/// - **Thresholds**: minimum text length and id prefix length
/// - **Base URL**: resolves relative `href` values the way a browser does
#[derive(Debug, Clone)]
pub struct ScanState {
    seen_texts: HashSet<String>,
    base_url: Option<Url>,
    min_text_len: usize,
    id_prefix_len: usize,
}

impl ScanState {
    /// Create state with default thresholds and no base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen_texts: HashSet::new(),
            base_url: None,
            min_text_len: MIN_TEXT_LEN,
            id_prefix_len: ID_PREFIX_LEN,
        }
    }

    /// Create state configured from options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            seen_texts: HashSet::new(),
            base_url: options.page_url.as_deref().and_then(url_utils::parse_url),
            min_text_len: options.min_text_len,
            id_prefix_len: options.id_prefix_len,
        }
    }

    /// Base URL for hyperlink resolution.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Number of leading characters hashed into a reference id.
    #[must_use]
    pub fn id_prefix_len(&self) -> usize {
        self.id_prefix_len
    }

    /// Whether a normalized text passes the noise filter and has not been
    /// accepted before in this scan.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        text_len(text) > self.min_text_len && !self.seen_texts.contains(text)
    }

    /// Record an accepted text. Returns `false` if it was already seen.
    pub fn mark_seen(&mut self, text: &str) -> bool {
        self.seen_texts.insert(text.to_string())
    }

    /// Number of distinct texts accepted so far.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen_texts.len()
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

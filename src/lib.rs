//! # ref-tracker
//!
//! Finds bibliographic reference entries on rendered web pages and keeps a
//! per-page snapshot of them up to date as the page changes.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = r#"<ol class="references">
//!   <li>Doe, J. (2020). A study of things. <a href="https://doi.org/10.1000/xyz">doi</a></li>
//! </ol>"#;
//!
//! let result = ref_tracker::scan(html);
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.references[0].identifier.as_deref(), Some("10.1000/xyz"));
//! ```
//!
//! ## Pipeline
//!
//! - **Scan**: an ordered cascade of CSS matchers, most specific first; the
//!   first matcher that yields an accepted entry wins
//! - **Extract**: per node, normalized text, a DOI-like identifier and the
//!   best hyperlink
//! - **Track**: a debounced refresh loop reconciles each scan against the
//!   previous one, persists changes and broadcasts them

mod error;
mod options;
mod patterns;
mod result;

/// DOM access helpers over `dom_query`.
pub mod dom;

/// Page decoding from raw bytes.
pub mod encoding;

/// Per-node reference extraction.
pub mod extractor;

/// Request, response and event messages.
pub mod messages;

/// Page capture.
pub mod page;

/// The selector cascade.
pub mod selector;

/// Display settings.
pub mod settings;

/// Snapshot persistence.
pub mod store;

/// Change detection and the refresh loop.
pub mod tracker;

/// URL helpers for link resolution and page keys.
pub mod url_utils;

/// Filtering and formatting of reference lists.
pub mod view;

use dom_query::Document;

pub use error::{Error, Result};
pub use messages::{Event, Request, Response};
pub use options::{Options, DEBOUNCE, DEFAULT_MATCHERS, ID_PREFIX_LEN, MIN_TEXT_LEN, REFRESH_INTERVAL};
pub use page::{Page, PageSource, StaticPage};
pub use result::{Link, PageSnapshot, Reference, ScanResult};
pub use selector::Cascade;
pub use settings::Theme;
pub use store::{MemoryStore, SledStore, SnapshotStore};
pub use tracker::{reconcile, LoopState, Reconciliation, RefreshHandle, RefreshLoop, Tracker};

/// Scan an HTML document with default options.
#[must_use]
pub fn scan(html: &str) -> ScanResult {
    scan_with_options(html, &Options::default())
}

/// Scan an HTML document.
///
/// ```rust
/// use ref_tracker::{scan_with_options, Options};
///
/// let html = r#"<div class="csl-entry">Roe, R. (2021). Relative links. <a href="/pdf/1">pdf</a></div>"#;
/// let result = scan_with_options(html, &Options::for_page("https://example.org/paper"));
/// assert_eq!(result.references[0].url(), Some("https://example.org/pdf/1"));
/// ```
#[must_use]
pub fn scan_with_options(html: &str, options: &Options) -> ScanResult {
    let doc = dom::parse(html);
    scan_document(&doc, options)
}

/// Scan raw page bytes, detecting the charset first.
#[must_use]
pub fn scan_bytes(html: &[u8], options: &Options) -> ScanResult {
    scan_with_options(&encoding::transcode_to_utf8(html), options)
}

/// Scan an already parsed document.
#[must_use]
pub fn scan_document(doc: &Document, options: &Options) -> ScanResult {
    let state = extractor::ScanState::from_options(options);
    Cascade::from_options(options).scan(doc, state)
}

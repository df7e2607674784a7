//! Reference entry extraction.
//!
//! Turns one candidate DOM node into one normalized `Reference`.
//!
//! # Module Structure
//!
//! - `text`: whitespace normalization and stable reference ids
//! - `identifier`: DOI-like identifiers from structured attributes and resolver links
//! - `link`: best hyperlink, with a free-text DOI fallback
//! - `state`: per-scan bookkeeping (seen texts, thresholds, base URL)
//! - `entry`: text selection policy and `Reference` composition
//!
//! # Usage
//!
//! ```rust
//! use ref_tracker::dom;
//! use ref_tracker::extractor::{build_entry, ScanState};
//!
//! let doc = dom::parse(r#"<ol><li>Doe, J. (2020). A study. <a href="https://doi.org/10.1/x">doi</a></li></ol>"#);
//! let mut state = ScanState::new();
//! let entry = build_entry(&doc.select("li"), 1, &mut state).unwrap();
//! assert_eq!(entry.identifier.as_deref(), Some("10.1/x"));
//! ```

pub mod entry;
pub mod identifier;
pub mod link;
pub mod state;
pub mod text;

pub use entry::{build_entry, entry_text};
pub use identifier::extract_identifier;
pub use link::{doi_from_text, resolve_link};
pub use state::ScanState;
pub use text::{normalize, reference_id};

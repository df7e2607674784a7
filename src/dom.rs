//! DOM Operations Adapter
//!
//! Thin, read-only helpers over the `dom_query` crate. The scanner never
//! mutates the page, so only parsing, querying, attribute and text access
//! live here.

// Re-export core types for external use
pub use dom_query::{Document, Matcher, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::error::{Error, Result};

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Querying ===

/// First descendant matching a CSS selector (empty selection if none).
///
/// `selector` must be a valid compile-time constant; user supplied selectors
/// go through [`compile_selector`].
#[inline]
#[must_use]
pub fn query_selector<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select_single(selector)
}

/// All descendants matching a CSS selector, in document order.
#[must_use]
pub fn query_selector_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Compile a CSS selector, reporting unsupported expressions as errors
/// instead of panicking.
pub fn compile_selector(selector: &str) -> Result<Matcher> {
    Matcher::new(selector).map_err(|e| Error::InvalidSelector(format!("{selector}: {e:?}")))
}

/// All elements of the document matching a compiled selector, in document
/// order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, matcher: &Matcher) -> Vec<Selection<'a>> {
    doc.select_matcher(matcher)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

//! DOI-like identifier extraction.
//!
//! Only structured evidence counts here: the CSL data attribute, then
//! resolver hyperlinks. Plain-text DOIs are deliberately not reported as
//! identifiers; the link resolver turns them into links instead.

use dom_query::Selection;
use url::Url;

use crate::dom;
use crate::patterns::{CSL_ENTRY_ATTR, CSL_ENTRY_ATTR_SELECTOR, DOI_LINK_PATH, LINK_SELECTOR};
use crate::url_utils::{is_doi_url, resolve_href};

/// Find the identifier of a reference node.
///
/// Priority (first match wins):
/// 1. `data-csl-entry-id` on a descendant, then on the node itself
/// 2. the path after `doi.org/` of the first resolver hyperlink, verbatim
///
/// # Example
///
/// ```rust
/// use ref_tracker::dom;
/// use ref_tracker::extractor::identifier::extract_identifier;
///
/// let doc = dom::parse(r#"<li><a href="https://doi.org/10.5/abc">link</a></li>"#);
/// let li = doc.select("li");
/// assert_eq!(extract_identifier(&li, None).as_deref(), Some("10.5/abc"));
/// ```
#[must_use]
pub fn extract_identifier(node: &Selection, base: Option<&Url>) -> Option<String> {
    structured_identifier(node).or_else(|| resolver_link_identifier(node, base))
}

fn structured_identifier(node: &Selection) -> Option<String> {
    let entry = dom::query_selector(node, CSL_ENTRY_ATTR_SELECTOR);
    let value = if entry.exists() {
        dom::get_attribute(&entry, CSL_ENTRY_ATTR)
    } else {
        dom::get_attribute(node, CSL_ENTRY_ATTR)
    };
    value.filter(|v| !v.trim().is_empty())
}

fn resolver_link_identifier(node: &Selection, base: Option<&Url>) -> Option<String> {
    dom::query_selector_all(node, LINK_SELECTOR)
        .iter()
        .filter_map(|link| dom::get_attribute(link, "href"))
        .map(|href| resolve_href(&href, base))
        .filter(|target| is_doi_url(target))
        .find_map(|target| DOI_LINK_PATH.captures(&target).map(|caps| caps[1].to_string()))
}

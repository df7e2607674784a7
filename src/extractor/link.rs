//! Link resolution for reference entries.
//!
//! Hyperlinks are authoritative: a resolver link beats any other link, any
//! link beats text. Only when a node has no hyperlink at all is its text
//! searched for a DOI, from the most to the least specific pattern.

use dom_query::Selection;
use url::Url;

use crate::dom;
use crate::patterns::{DOI_TEXT_PATTERNS, DOI_TRAILING_PUNCT, LINK_SELECTOR};
use crate::result::Link;
use crate::url_utils::{is_doi_url, resolve_href, DOI_RESOLVER};

/// Find the best hyperlink for a reference node.
///
/// 1. first descendant link to `doi.org`
/// 2. otherwise the first descendant link
/// 3. otherwise a resolver link built from a DOI found in the node's text
///
/// # Example
///
/// ```rust
/// use ref_tracker::dom;
/// use ref_tracker::extractor::link::resolve_link;
///
/// let doc = dom::parse("<li>See doi:10.1000/xyz123.</li>");
/// let link = resolve_link(&doc.select("li"), None).unwrap();
/// assert_eq!(link.url, "https://doi.org/10.1000/xyz123");
/// assert_eq!(link.text, "10.1000/xyz123");
/// ```
#[must_use]
pub fn resolve_link(node: &Selection, base: Option<&Url>) -> Option<Link> {
    let links = anchor_links(node, base);

    if let Some(doi_link) = links.iter().find(|link| is_doi_url(&link.url)) {
        return Some(doi_link.clone());
    }

    if let Some(first) = links.into_iter().next() {
        return Some(first);
    }

    doi_from_text(&dom::text_content(node)).map(|doi| Link {
        url: format!("{DOI_RESOLVER}{doi}"),
        text: doi,
    })
}

/// Find a DOI in free text and strip sentence punctuation from its end.
///
/// Patterns are tried in order: full resolver URL, schemeless resolver
/// path, `doi:` label, bare `10.NNNN/...` token.
///
/// # Example
///
/// ```rust
/// use ref_tracker::extractor::link::doi_from_text;
///
/// assert_eq!(doi_from_text("(doi: 10.1000/abc)").as_deref(), Some("10.1000/abc"));
/// assert_eq!(doi_from_text("no identifier here"), None);
/// ```
#[must_use]
pub fn doi_from_text(text: &str) -> Option<String> {
    DOI_TEXT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .map(|caps| DOI_TRAILING_PUNCT.replace(&caps[1], "").into_owned())
    })
}

/// Descendant `a[href]` elements as links, in document order.
///
/// Anchors whose resolved target is empty are skipped.
fn anchor_links(node: &Selection, base: Option<&Url>) -> Vec<Link> {
    dom::query_selector_all(node, LINK_SELECTOR)
        .iter()
        .filter_map(|anchor| {
            let href = dom::get_attribute(anchor, "href")?;
            let url = resolve_href(&href, base);
            if url.is_empty() {
                return None;
            }
            Some(Link {
                url,
                text: dom::text_content(anchor).trim().to_string(),
            })
        })
        .collect()
}

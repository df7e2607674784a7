//! Entry building: one candidate node to one `Reference`.

use chrono::Utc;
use dom_query::Selection;

use crate::dom;
use crate::extractor::identifier::extract_identifier;
use crate::extractor::link::resolve_link;
use crate::extractor::state::ScanState;
use crate::extractor::text::{normalize, reference_id};
use crate::patterns::{CSL_ENTRY_ATTR_SELECTOR, CSL_ENTRY_CLASS_SELECTOR, TEXT_CLASS_SELECTOR};
use crate::result::Reference;

/// Normalized display text of a candidate node.
///
/// First match wins:
/// 1. a nested CSL entry (by class, then by data attribute)
/// 2. a nested element whose class mentions "text"
/// 3. the node itself when it is a CSL entry
/// 4. the node's full text
#[must_use]
pub fn entry_text(node: &Selection) -> String {
    for selector in [CSL_ENTRY_CLASS_SELECTOR, CSL_ENTRY_ATTR_SELECTOR, TEXT_CLASS_SELECTOR] {
        let nested = dom::query_selector(node, selector);
        if nested.exists() {
            return normalize(&dom::text_content(&nested));
        }
    }

    // A CSL entry node and any other node both contribute their full text.
    normalize(&dom::text_content(node))
}

/// Build a reference from a candidate node.
///
/// Returns `None` when the text is too short or was already accepted earlier
/// in the same scan; both are ordinary filtering outcomes. On success the
/// text is recorded in `state` and the reference gets `position` as its
/// index.
pub fn build_entry(node: &Selection, position: usize, state: &mut ScanState) -> Option<Reference> {
    let text = entry_text(node);
    if !state.accepts(&text) {
        return None;
    }
    state.mark_seen(&text);

    Some(Reference {
        id: reference_id(&text, state.id_prefix_len()),
        index: position,
        link: resolve_link(node, state.base_url()),
        identifier: extract_identifier(node, state.base_url()),
        captured_at: Utc::now(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(html: &str) -> String {
        let doc = dom::parse(html);
        entry_text(&doc.select("li"))
    }

    #[test]
    fn test_nested_csl_entry_text_wins() {
        let text = text_of(
            r#"<li><span class="num">1.</span>
               <div class="csl-entry">  Doe, J.   (2020). Title. </div>
               <span class="ref-text">other</span></li>"#,
        );
        assert_eq!(text, "Doe, J. (2020). Title.");
    }

    #[test]
    fn test_nested_csl_attribute_text() {
        let text = text_of(
            r#"<li><b>[2]</b><div data-csl-entry-id="x">Roe, R. (2019). Other.</div></li>"#,
        );
        assert_eq!(text, "Roe, R. (2019). Other.");
    }

    #[test]
    fn test_text_class_element() {
        let text = text_of(
            r#"<li><span class="label">[3]</span><span class="citation-text">Moe, M. Paper.</span></li>"#,
        );
        assert_eq!(text, "Moe, M. Paper.");
    }

    #[test]
    fn test_node_itself_csl_entry() {
        let doc = dom::parse(r#"<div class="csl-entry">Self, S.
            (2018). Own text.</div>"#);
        assert_eq!(entry_text(&doc.select("div")), "Self, S. (2018). Own text.");
    }

    #[test]
    fn test_full_text_fallback() {
        let text = text_of("<li>\n  Plain,   P. (2017).\n  Fallback.\n</li>");
        assert_eq!(text, "Plain, P. (2017). Fallback.");
    }

    #[test]
    fn test_build_entry_composes_fields() {
        let doc = dom::parse(
            r#"<li data-csl-entry-id="10.1000/abc">Doe, J. (2020). A long enough title.
               <a href="https://doi.org/10.1000/abc">doi</a></li>"#,
        );
        let mut state = ScanState::new();
        let entry = build_entry(&doc.select("li"), 4, &mut state).unwrap();

        assert_eq!(entry.index, 4);
        assert_eq!(entry.text, "Doe, J. (2020). A long enough title. doi");
        assert_eq!(entry.id, reference_id(&entry.text, 100));
        assert_eq!(entry.identifier.as_deref(), Some("10.1000/abc"));
        assert_eq!(entry.url(), Some("https://doi.org/10.1000/abc"));
    }

    #[test]
    fn test_build_entry_length_boundary() {
        let mut state = ScanState::new();

        let twenty = dom::parse(&format!("<li>{}</li>", "a".repeat(20)));
        assert!(build_entry(&twenty.select("li"), 1, &mut state).is_none());

        let twenty_one = dom::parse(&format!("<li>{}</li>", "a".repeat(21)));
        assert!(build_entry(&twenty_one.select("li"), 1, &mut state).is_some());
    }

    #[test]
    fn test_build_entry_rejects_duplicate_text() {
        let doc = dom::parse(
            r#"<ol><li>Same reference text, twice over.</li>
               <li>Same   reference text, twice over.</li></ol>"#,
        );
        let items = dom::query_selector_all(&doc.select("ol"), "li");
        let mut state = ScanState::new();

        assert!(build_entry(&items[0], 1, &mut state).is_some());
        assert!(build_entry(&items[1], 2, &mut state).is_none());
    }

    #[test]
    fn test_text_doi_gives_link_but_no_identifier() {
        // Plain-text DOIs become links only; the identifier field stays empty.
        let doc = dom::parse("<li>Author, A. (2021). Work title. doi:10.1000/xyz123</li>");
        let mut state = ScanState::new();
        let entry = build_entry(&doc.select("li"), 1, &mut state).unwrap();

        assert_eq!(entry.url(), Some("https://doi.org/10.1000/xyz123"));
        assert_eq!(entry.identifier, None);
    }
}

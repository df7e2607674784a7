//! Selector cascade.
//!
//! Matchers are tried in order and the first one that yields at least one
//! accepted entry wins; later, more generic matchers never run once an
//! earlier one succeeded, even if it only captured part of the list.
//! Generic matchers risk picking up unrelated list items, so they only get
//! a chance when nothing specific matched.

use dom_query::Document;
use tracing::{debug, info, warn};

use crate::dom;
use crate::extractor::{build_entry, ScanState};
use crate::options::{Options, DEFAULT_MATCHERS};
use crate::result::ScanResult;

/// Ordered list of structural matchers (CSS selectors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    matchers: Vec<String>,
}

impl Cascade {
    /// Create a cascade from selectors, most specific first.
    #[must_use]
    pub fn new<I, S>(matchers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matchers: matchers.into_iter().map(Into::into).collect(),
        }
    }

    /// Create the cascade configured in `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.matchers.iter().cloned())
    }

    /// The selectors, in the order they are tried.
    #[must_use]
    pub fn matchers(&self) -> &[String] {
        &self.matchers
    }

    /// Scan a parsed document.
    ///
    /// A matcher that fails to compile is logged and skipped; it never
    /// aborts the scan. The result holds the entries of the single winning
    /// matcher in document order, indexed from 1.
    #[must_use]
    pub fn scan(&self, doc: &Document, mut state: ScanState) -> ScanResult {
        debug!(matchers = self.matchers.len(), "scanning for references");

        for selector in &self.matchers {
            let matcher = match dom::compile_selector(selector) {
                Ok(matcher) => matcher,
                Err(err) => {
                    warn!(%selector, error = %err, "skipping matcher");
                    continue;
                }
            };

            let candidates = dom::select_all(doc, &matcher);
            debug!(%selector, found = candidates.len(), "matcher queried");

            let mut references = Vec::new();
            for node in &candidates {
                if let Some(reference) = build_entry(node, references.len() + 1, &mut state) {
                    references.push(reference);
                }
            }

            if !references.is_empty() {
                info!(%selector, count = references.len(), "found references");
                return ScanResult {
                    references,
                    matcher: Some(selector.clone()),
                };
            }
        }

        debug!("no matcher produced references");
        ScanResult::default()
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(DEFAULT_MATCHERS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_html(cascade: &Cascade, html: &str) -> ScanResult {
        let doc = dom::parse(html);
        cascade.scan(&doc, ScanState::new())
    }

    #[test]
    fn test_first_matching_matcher_wins() {
        let html = r#"
            <ol class="references">
                <li>Alpha, A. (2001). First specific reference.</li>
            </ol>
            <div class="references"><ul>
                <li>Beta, B. (2002). Generic list item number one.</li>
                <li>Gamma, G. (2003). Generic list item number two.</li>
            </ul></div>
        "#;
        let result = scan_html(&Cascade::default(), html);

        assert_eq!(result.len(), 1);
        assert_eq!(result.matcher.as_deref(), Some("ol.references li"));
    }

    #[test]
    fn test_matcher_without_accepted_entries_falls_through() {
        // The first matcher finds only noise, so the second one runs.
        let cascade = Cascade::new(["ul.noise li", "ol.refs li"]);
        let html = r#"
            <ul class="noise"><li>short</li><li>tiny</li></ul>
            <ol class="refs"><li>Delta, D. (2004). A proper reference entry.</li></ol>
        "#;
        let result = scan_html(&cascade, html);

        assert_eq!(result.len(), 1);
        assert_eq!(result.matcher.as_deref(), Some("ol.refs li"));
    }

    #[test]
    fn test_invalid_matcher_skipped() {
        let cascade = Cascade::new(["li[[", "ol li"]);
        let result = scan_html(&cascade, "<ol><li>Epsilon, E. (2005). Survives bad selector.</li></ol>");

        assert_eq!(result.len(), 1);
        assert_eq!(result.matcher.as_deref(), Some("ol li"));
    }

    #[test]
    fn test_indices_are_contiguous_after_rejections() {
        let cascade = Cascade::new(["ol li"]);
        let html = r#"<ol>
            <li>Zeta, Z. (2006). The first valid reference.</li>
            <li>too short</li>
            <li>Zeta, Z. (2006). The first valid reference.</li>
            <li>Eta, E. (2007). The second valid reference.</li>
        </ol>"#;
        let result = scan_html(&cascade, html);

        let indices: Vec<usize> = result.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert!(result.references[1].text.starts_with("Eta"));
    }

    #[test]
    fn test_no_match_yields_empty_result() {
        let result = scan_html(&Cascade::default(), "<p>No references on this page at all.</p>");
        assert!(result.is_empty());
        assert!(result.matcher.is_none());
    }

    #[test]
    fn test_from_options_keeps_order() {
        let options = Options {
            matchers: vec!["a".to_string(), "b".to_string()],
            ..Options::default()
        };
        assert_eq!(Cascade::from_options(&options).matchers(), ["a", "b"]);
        assert_eq!(Cascade::default().matchers().len(), DEFAULT_MATCHERS.len());
    }
}

//! Compiled regex patterns and CSS selectors for reference extraction.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace (spaces, tabs, newlines) for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// DOI Patterns
// =============================================================================

/// Captures everything after `doi.org/` in a hyperlink target.
pub static DOI_LINK_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"doi\.org/(.+)").expect("DOI_LINK_PATH regex")
});

/// Full resolver URL in free text: `https://doi.org/10.1000/xyz`.
pub static DOI_FULL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://doi\.org/(10\.\S+)").expect("DOI_FULL_URL regex")
});

/// Schemeless resolver path in free text: `doi.org/10.1000/xyz`.
pub static DOI_HOST_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)doi\.org/(10\.\S+)").expect("DOI_HOST_PATH regex")
});

/// `doi:` or `doi` label followed by a `10.` token: `doi: 10.1000/xyz`.
pub static DOI_PREFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)doi[:\s]*(10\.\S+)").expect("DOI_PREFIXED regex")
});

/// Bare DOI anywhere in the text: `10.1000/xyz`.
pub static DOI_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)(10\.\d{4,}/\S+)").expect("DOI_BARE regex")
});

/// Free-text DOI patterns, most specific first.
///
/// Generic numeric-looking tokens only get a chance when nothing more
/// specific matched.
pub static DOI_TEXT_PATTERNS: LazyLock<[&'static Regex; 4]> =
    LazyLock::new(|| [&*DOI_FULL_URL, &*DOI_HOST_PATH, &*DOI_PREFIXED, &*DOI_BARE]);

/// Trailing punctuation that sentence context glues onto a DOI.
pub static DOI_TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.,;:)\]'"]+$"#).expect("DOI_TRAILING_PUNCT regex")
});

// =============================================================================
// CSS Selectors and attribute names
// =============================================================================

/// Attribute carrying the identifier of a structured (CSL) citation entry.
pub const CSL_ENTRY_ATTR: &str = "data-csl-entry-id";

/// Selector for CSL entries by class.
pub const CSL_ENTRY_CLASS_SELECTOR: &str = ".csl-entry";

/// Selector for CSL entries by data attribute.
pub const CSL_ENTRY_ATTR_SELECTOR: &str = "[data-csl-entry-id]";

/// Selector for elements whose class name mentions "text".
pub const TEXT_CLASS_SELECTOR: &str = r#"[class*="text"]"#;

/// Selector for hyperlinks with a target.
pub const LINK_SELECTOR: &str = "a[href]";

/// Selector for the document title.
pub const TITLE_SELECTOR: &str = "title";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_normalize_collapses_runs() {
        let result = WHITESPACE_NORMALIZE.replace_all("a \t\n  b", " ");
        assert_eq!(result, "a b");
    }

    #[test]
    fn doi_prefixed_accepts_colon_and_space() {
        let caps = DOI_PREFIXED.captures("DOI: 10.1000/abc").expect("match");
        assert_eq!(&caps[1], "10.1000/abc");
        let caps = DOI_PREFIXED.captures("doi 10.1000/abc").expect("match");
        assert_eq!(&caps[1], "10.1000/abc");
    }

    #[test]
    fn doi_bare_requires_four_digit_registrant() {
        assert!(DOI_BARE.is_match("see 10.1234/x"));
        assert!(!DOI_BARE.is_match("version 10.12/x"));
    }

    #[test]
    fn doi_boundaries_are_ascii_only() {
        // Non-ASCII letters count as non-word characters.
        let caps = DOI_BARE.captures("r\u{e9}f\u{e9}rence\u{e9}10.1234/x").expect("match");
        assert_eq!(&caps[1], "10.1234/x");
        let caps = DOI_PREFIXED.captures("\u{e9}doi:10.1000/abc").expect("match");
        assert_eq!(&caps[1], "10.1000/abc");
        assert!(!DOI_PREFIXED.is_match("emptydoi:10.1000/abc"));
        assert!(!DOI_BARE.is_match("x10.1234/y"));
    }

    #[test]
    fn doi_trailing_punct_strips_sentence_glue() {
        assert_eq!(DOI_TRAILING_PUNCT.replace("10.1/x).", ""), "10.1/x");
        assert_eq!(DOI_TRAILING_PUNCT.replace("10.1/x", ""), "10.1/x");
    }

    #[test]
    fn text_patterns_ordered_specific_first() {
        let text = "https://doi.org/10.5555/first also 10.9999/second";
        let first = DOI_TEXT_PATTERNS
            .iter()
            .find_map(|re| re.captures(text).map(|c| c[1].to_string()));
        assert_eq!(first.as_deref(), Some("10.5555/first"));
    }
}

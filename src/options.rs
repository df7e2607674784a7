//! Configuration options for reference scanning and tracking.
//!
//! The `Options` struct controls the selector cascade, the noise filter and
//! the timing of the refresh loop.

use std::time::Duration;

/// Entries whose normalized text is this long or shorter are discarded.
pub const MIN_TEXT_LEN: usize = 20;

/// Number of leading characters of the text that feed the reference id.
pub const ID_PREFIX_LEN: usize = 100;

/// Quiet period after the last page mutation before a rescan.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Interval of the periodic rescan.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(3);

/// Structural matchers, most specific first.
///
/// Site-specific reference lists come first, then structured CSL entries,
/// then common academic list shapes, then anything that merely looks like a
/// citation list item.
pub const DEFAULT_MATCHERS: &[&str] = &[
    r#"ol[class*="citations"] li[data-cy="reference-cite"]"#,
    r#"ol[class*="references"] li[data-cy="reference-cite"]"#,
    ".csl-entry",
    "div[data-csl-entry-id]",
    "ol.references li",
    "ol.citation-list li",
    "ul.references li",
    "div.references li",
    "section.references li",
    "#references li",
    ".reference-list li",
    r#"[class*="reference"] li"#,
    r#"[class*="citation"] li"#,
    r#"ol li[data-cy*="cite"]"#,
    r#"ol li[data-cy*="reference"]"#,
];

/// Configuration options for scanning and tracking.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use ref_tracker::Options;
///
/// let options = Options {
///     page_url: Some("https://example.org/paper".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.min_text_len, 20);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Normalized texts of this length or shorter are rejected as noise.
    ///
    /// Default: `20`
    pub min_text_len: usize,

    /// How many leading characters of the text determine the reference id.
    ///
    /// Default: `100`
    pub id_prefix_len: usize,

    /// Ordered CSS selectors tried by the cascade.
    ///
    /// Default: [`DEFAULT_MATCHERS`]
    pub matchers: Vec<String>,

    /// URL of the scanned page.
    ///
    /// Relative `href` values are resolved against it, the same way a
    /// browser exposes absolute link targets. It also keys the persisted
    /// snapshot.
    ///
    /// Default: `None`
    pub page_url: Option<String>,

    /// Debounce window for page mutation events.
    ///
    /// Default: 500ms
    pub debounce: Duration,

    /// Period of the background rescan.
    ///
    /// Default: 3s
    pub refresh_interval: Duration,
}

impl Options {
    /// Returns options with the given page URL and defaults elsewhere.
    #[must_use]
    pub fn for_page(url: impl Into<String>) -> Self {
        Self {
            page_url: Some(url.into()),
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_text_len: MIN_TEXT_LEN,
            id_prefix_len: ID_PREFIX_LEN,
            matchers: DEFAULT_MATCHERS.iter().map(|m| (*m).to_string()).collect(),
            page_url: None,
            debounce: DEBOUNCE,
            refresh_interval: REFRESH_INTERVAL,
        }
    }
}

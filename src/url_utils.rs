//! URL Utility Functions
//!
//! Resolution of hyperlink targets against the page URL, resolver-host
//! detection for DOI links, and the page key used by the snapshot store.

use url::Url;

/// Host of the DOI resolver.
pub const DOI_HOST: &str = "doi.org";

/// Prefix of resolver links built from bare identifiers.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Resolve an `href` value the way a browser exposes `anchor.href`.
///
/// Absolute and special (`mailto:`, `javascript:`, ...) targets are returned
/// trimmed. Relative targets are joined onto `base` when one is known and
/// returned unchanged otherwise.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();

    if href.is_empty() {
        return base.map(Url::to_string).unwrap_or_default();
    }

    if let Ok(url) = Url::parse(href) {
        return url.to_string();
    }

    match base.map(|b| b.join(href)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => href.to_string(),
    }
}

/// Whether a link target points at the DOI resolver (`doi.org` or one of
/// its subdomains such as `dx.doi.org`).
///
/// Targets that do not parse as absolute URLs fall back to a plain substring
/// test so that scheme-relative or malformed resolver links still count.
#[must_use]
pub fn is_doi_url(target: &str) -> bool {
    match Url::parse(target.trim()) {
        Ok(url) => url.host_str().is_some_and(|host| {
            let host = host.to_ascii_lowercase();
            host == DOI_HOST || host.ends_with(".doi.org")
        }),
        Err(_) => target.contains(DOI_HOST),
    }
}

/// Store key for a page: the URL without its fragment.
///
/// In-page navigation (`#section`) stays on the same snapshot.
#[must_use]
pub fn page_key(url_str: &str) -> String {
    let Some(mut url) = parse_url(url_str) else {
        return url_str.trim().to_string();
    };
    url.set_fragment(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url_valid() {
        let (is_abs, url) = is_absolute_url("https://example.com/path");
        assert!(is_abs);
        assert!(url.is_some());
    }

    #[test]
    fn test_is_absolute_url_invalid() {
        assert!(!is_absolute_url("/relative/path").0);
        assert!(!is_absolute_url("example.com").0);
        assert!(!is_absolute_url("").0);
    }

    #[test]
    fn test_resolve_href_relative_with_base() {
        let base = Url::parse("https://journal.example/articles/42").ok();
        assert_eq!(
            resolve_href("/refs/1", base.as_ref()),
            "https://journal.example/refs/1"
        );
        assert_eq!(
            resolve_href("ref-2", base.as_ref()),
            "https://journal.example/articles/ref-2"
        );
    }

    #[test]
    fn test_resolve_href_relative_without_base() {
        assert_eq!(resolve_href(" /refs/1 ", None), "/refs/1");
    }

    #[test]
    fn test_resolve_href_absolute_and_special() {
        assert_eq!(
            resolve_href("https://doi.org/10.5/abc", None),
            "https://doi.org/10.5/abc"
        );
        assert_eq!(resolve_href("mailto:a@b.c", None), "mailto:a@b.c");
    }

    #[test]
    fn test_resolve_href_empty() {
        let base = Url::parse("https://journal.example/a").ok();
        assert_eq!(resolve_href("", base.as_ref()), "https://journal.example/a");
        assert_eq!(resolve_href("  ", None), "");
    }

    #[test]
    fn test_is_doi_url() {
        assert!(is_doi_url("https://doi.org/10.5/abc"));
        assert!(is_doi_url("http://dx.doi.org/10.5/abc"));
        assert!(is_doi_url("HTTPS://DOI.ORG/10.5/abc"));
        assert!(!is_doi_url("https://example.com/doi.org"));
        assert!(!is_doi_url("https://notdoi.org/10.5/abc"));
        assert!(is_doi_url("//doi.org/10.5/abc"));
    }

    #[test]
    fn test_page_key_drops_fragment() {
        assert_eq!(
            page_key("https://example.org/paper#references"),
            "https://example.org/paper"
        );
        assert_eq!(page_key("file.html"), "file.html");
    }
}

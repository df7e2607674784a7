//! Page decoding.
//!
//! Saved pages and pages piped from other tools arrive as bytes. The charset
//! comes from a byte order mark, else from the first `<meta>` declaration in
//! the head, else UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes inspected for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// Charset label declared in a `<meta>` tag, if any.
fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Detect the encoding of a page.
///
/// Unknown labels fall back to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// ```
/// use ref_tracker::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"latin1\"><li>M\xFCller, K. (2019).</li>";
/// assert!(transcode_to_utf8(html).contains("Müller"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let (decoded, _, _) = detect_encoding(html).decode(html);
    decoded.into_owned()
}

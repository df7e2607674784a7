//! Text normalization and reference ids.

use crate::patterns::WHITESPACE_NORMALIZE;

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Pure and idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Example
///
/// ```rust
/// use ref_tracker::extractor::text::normalize;
///
/// assert_eq!(normalize("  Doe, J.\n\t(2020)  "), "Doe, J. (2020)");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(raw, " ").trim().to_string()
}

/// Length of a normalized text as counted by the noise filter.
///
/// Counts UTF-16 code units, the length a page script sees, so a character
/// outside the Basic Multilingual Plane counts twice.
#[inline]
#[must_use]
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Stable id for a reference text.
///
/// Only the first `prefix_len` characters (UTF-16 code units, as the page
/// reports them) take part, so two texts that share that prefix share the
/// id. The hash is the 32-bit `h * 31 + unit` string hash rendered as
/// `ref_` + base 36 of its magnitude, which keeps ids compatible with
/// snapshots written by the browser extension.
#[must_use]
pub fn reference_id(text: &str, prefix_len: usize) -> String {
    let hash = text
        .encode_utf16()
        .take(prefix_len)
        .fold(0_i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
        });
    format!("ref_{}", to_base36(hash.unsigned_abs()))
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

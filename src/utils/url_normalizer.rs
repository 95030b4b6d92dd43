//! Destination URL normalization.
//!
//! Stored destinations always carry an HTTP(S) scheme so that redirects
//! never resolve relative to the short link host.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a leading `http://` or `https://`, case-insensitively.
static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// Scheme prepended to destinations that lack one.
const DEFAULT_SCHEME: &str = "http://";

/// Normalizes a raw destination URL.
///
/// The input is trimmed of surrounding whitespace. If it already starts with
/// `http://` or `https://` (any case) it is returned as-is, otherwise
/// `http://` is prepended. No further validation is performed: reachability
/// and well-formedness are not checked.
///
/// Callers must reject blank input before calling this function.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/page"), "http://example.com/page");
/// assert_eq!(normalize_url("  HTTPS://Example.com "), "HTTPS://Example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();

    if SCHEME_REGEX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    }
}

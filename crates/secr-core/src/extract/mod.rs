//! Bounded preview-image extraction.
//!
//! Scans at most [`MAX_SCAN_BYTES`] of a document for an `og:image` style
//! `<meta>` tag with a handful of regexes. This is a bounded scan, not an HTML
//! parser: it terminates in time and memory proportional to the cap whatever
//! the markup looks like.

mod patterns;

use regex::Captures;
use url::Url;

/// Bytes of the document that are scanned. The tag conventionally sits in `<head>`.
pub const MAX_SCAN_BYTES: usize = 50 * 1024;

/// Returns the first preview image reference found in the first `MAX_SCAN_BYTES` of `body`.
pub fn extract_preview_image(body: &[u8]) -> Option<String> {
    extract_preview_image_within(body, MAX_SCAN_BYTES)
}

/// Like [`extract_preview_image`] with an explicit byte ceiling.
pub fn extract_preview_image_within(body: &[u8], max_bytes: usize) -> Option<String> {
    let head = &body[..body.len().min(max_bytes)];
    let text = String::from_utf8_lossy(head);
    patterns::IMAGE_PATTERNS
        .iter()
        .find_map(|re| re.captures(&text))
        .and_then(|caps| quoted_value(&caps).map(|v| decode_entities(v.trim())))
        .filter(|v| !v.is_empty())
}

/// The attribute value from a pattern with one group per quote style
/// (`"([^"]+)"|'([^']+)'`), so a double-quoted value may contain `'`.
pub(crate) fn quoted_value<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Resolves a possibly relative image reference against the page it came from.
///
/// Absolute references are returned unchanged; references that cannot be
/// resolved are dropped.
pub fn absolutize(base: &Url, reference: &str) -> Option<String> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Some(reference.to_string());
    }
    let joined = base.join(reference).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}

/// Decodes the few entities that show up inside attribute URLs.
pub(crate) fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&amp;", "&")
        .replace("&#38;", "&")
        .replace("&#x2F;", "/")
        .replace("&#47;", "/")
        .replace("&quot;", "\"")
}

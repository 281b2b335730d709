//! Destination heuristics for wrapper pages, in priority order.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::{is_wrapper_or_consent_host, is_wrapper_url};
use crate::extract::{decode_entities, quoted_value};

/// Attribute the aggregator puts the publisher URL in.
static DATA_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bdata-n-au\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("data attribute regex is valid")
});

static CANONICAL: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<link\b[^>]*?\brel\s*=\s*["']canonical["'][^>]*?\bhref\s*=\s*(?:"([^"]+)"|'([^']+)')"#)
            .expect("canonical regex is valid"),
        Regex::new(r#"(?i)<link\b[^>]*?\bhref\s*=\s*(?:"([^"]+)"|'([^']+)')[^>]*?\brel\s*=\s*["']canonical["']"#)
            .expect("canonical regex is valid"),
    ]
});

/// `url=` inside a meta refresh (or a script doing the same).
static REFRESH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\burl\s*=\s*['"]?([^"'\s>;]+)"#).expect("refresh regex is valid")
});

/// Searches a wrapper page for its real destination. `base` is the page URL,
/// used to resolve relative references.
pub fn find_destination(html: &str, base: &Url) -> Option<Url> {
    from_data_attribute(html, base)
        .or_else(|| from_canonical(html, base))
        .or_else(|| from_refresh(html))
}

fn parse_candidate(raw: &str, base: &Url) -> Option<Url> {
    let value = decode_entities(raw.trim());
    base.join(&value).ok()
}

fn from_data_attribute(html: &str, base: &Url) -> Option<Url> {
    DATA_ATTRIBUTE
        .captures_iter(html)
        .filter_map(|c| quoted_value(&c).and_then(|v| parse_candidate(v, base)))
        .find(|u| !is_wrapper_url(u))
}

fn from_canonical(html: &str, base: &Url) -> Option<Url> {
    CANONICAL
        .iter()
        .flat_map(|re| re.captures_iter(html))
        .filter_map(|c| quoted_value(&c).and_then(|v| parse_candidate(v, base)))
        .find(|u| !is_wrapper_url(u))
}

/// Refresh targets must be absolute, so no base is needed.
fn from_refresh(html: &str) -> Option<Url> {
    REFRESH_URL
        .captures_iter(html)
        .map(|c| decode_entities(&c[1]))
        .filter(|raw| raw.to_ascii_lowercase().starts_with("http"))
        .filter_map(|raw| Url::parse(&raw).ok())
        .find(|u| !is_wrapper_or_consent_host(u))
}

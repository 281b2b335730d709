//! Ordered `<meta>` patterns. Attribute order varies in the wild, so each
//! property has a property-first and a content-first variant. The content
//! value is captured in group 1 (double quotes) or group 2 (single quotes).

use regex::Regex;
use std::sync::LazyLock;

macro_rules! meta_patterns {
    ($attr:literal, $prop:literal) => {
        [
            concat!(
                r#"(?i)<meta\b[^>]*?\b"#, $attr, r#"\s*=\s*["']"#, $prop,
                r#"["'][^>]*?\bcontent\s*=\s*(?:"([^"]+)"|'([^']+)')"#
            ),
            concat!(
                r#"(?i)<meta\b[^>]*?\bcontent\s*=\s*(?:"([^"]+)"|'([^']+)')[^>]*?\b"#, $attr,
                r#"\s*=\s*["']"#, $prop, r#"["']"#
            ),
        ]
    };
}

pub(super) static IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        meta_patterns!("property", "og:image"),
        meta_patterns!("property", "og:image:url"),
        meta_patterns!("property", "og:image:secure_url"),
        meta_patterns!("name", "twitter:image"),
        meta_patterns!("name", "twitter:image:src"),
    ]
    .into_iter()
    .flatten()
    .map(|p| Regex::new(p).expect("meta pattern is valid"))
    .collect()
});

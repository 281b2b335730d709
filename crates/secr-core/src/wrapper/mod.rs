//! Wrapper-link resolution.
//!
//! Some links (news aggregator article links) point at an indirection page
//! whose real destination is not always exposed through an HTTP redirect. For
//! those we make one best-effort GET with client-followed redirects and, if
//! that lands back on the wrapper, dig the destination out of the page.
//!
//! The URL returned here is *not* trusted: the pipeline runs it through the
//! guard before fetching it.

mod heuristics;

pub use heuristics::find_destination;

use url::Url;

use crate::fetch::{GetOptions, RedirectMode, Transport};

/// Host serving wrapper links.
pub const WRAPPER_HOST: &str = "news.google.com";

/// Path prefixes of wrapper links on [`WRAPPER_HOST`].
const WRAPPER_PATH_PREFIXES: &[&str] = &["/rss/articles/", "/articles/", "/read/"];

/// True if `url` has the wrapper-link shape.
pub fn is_wrapper_url(url: &Url) -> bool {
    let host_matches = url
        .host_str()
        .map(|h| h.eq_ignore_ascii_case(WRAPPER_HOST))
        .unwrap_or(false);
    host_matches
        && WRAPPER_PATH_PREFIXES
            .iter()
            .any(|p| url.path().starts_with(p))
}

/// True for the wrapper's own domain and its consent interstitials.
pub(crate) fn is_wrapper_or_consent_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    host == WRAPPER_HOST || host.starts_with("consent.")
}

/// Finds the real destination of a wrapper link, or `None` if none can be found.
///
/// 1. The effective URL of a client-followed GET, if it left the wrapper.
/// 2. Otherwise the page body: data attribute, canonical link, `url=` refresh.
pub fn resolve_wrapper<T: Transport + ?Sized>(
    transport: &T,
    url: &Url,
    max_body_bytes: usize,
) -> Option<Url> {
    let opts = GetOptions {
        redirects: RedirectMode::Follow,
        max_body_bytes,
    };
    let page = match transport.get(url, &opts) {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(%url, error = %e, "wrapper fetch failed");
            return None;
        }
    };

    if page.url != *url && !is_wrapper_url(&page.url) && !is_wrapper_or_consent_host(&page.url) {
        tracing::debug!(wrapper = %url, destination = %page.url, "wrapper resolved by redirect");
        return Some(page.url);
    }

    let found = find_destination(&page.text(), &page.url);
    match &found {
        Some(dest) => tracing::debug!(wrapper = %url, destination = %dest, "wrapper resolved from page"),
        None => tracing::debug!(wrapper = %url, "wrapper destination not found"),
    }
    found
}

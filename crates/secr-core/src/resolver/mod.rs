//! The resolution pipeline.
//!
//! ```text
//! cache hit? -> guard(input) -> [wrapper link? resolve + guard destination]
//!            -> redirect walker (guard per hop) -> HTML? -> bounded extraction -> cache
//! ```
//!
//! Internally every resolution yields a typed [`Outcome`]. The public
//! [`PreviewResolver::resolve`] collapses it to `Option<String>` so callers
//! cannot tell "no preview image" from "unreachable" or "unsafe redirect".

mod outcome;

pub use outcome::{Outcome, Reason};

use std::sync::Arc;

use url::Url;

use crate::cache::ResultCache;
use crate::config::SecrConfig;
use crate::extract;
use crate::fetch::{CurlTransport, Transport};
use crate::guard;
use crate::redirect;
use crate::wrapper;

/// Byte and hop bounds applied to every resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub hop_limit: u32,
    pub max_scan_bytes: usize,
    pub max_wrapper_bytes: usize,
}

impl Limits {
    pub fn from_config(cfg: &SecrConfig) -> Self {
        Self {
            hop_limit: cfg.hop_limit,
            max_scan_bytes: cfg.max_scan_bytes,
            max_wrapper_bytes: cfg.max_wrapper_bytes,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from_config(&SecrConfig::default())
    }
}

/// Resolves preview images for external URLs. Cheap to clone; clones share
/// the cache and transport.
#[derive(Clone)]
pub struct PreviewResolver {
    cache: Arc<ResultCache>,
    transport: Arc<dyn Transport>,
    limits: Limits,
}

impl std::fmt::Debug for PreviewResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewResolver")
            .field("cache_len", &self.cache.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl PreviewResolver {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<ResultCache>, limits: Limits) -> Self {
        Self {
            cache,
            transport,
            limits,
        }
    }

    /// Resolver with a libcurl transport and a fresh cache, both sized from `cfg`.
    pub fn from_config(cfg: &SecrConfig) -> Self {
        Self::new(
            Arc::new(CurlTransport::from_config(cfg)),
            Arc::new(ResultCache::new(cfg.cache_capacity, cfg.cache_ttl())),
            Limits::from_config(cfg),
        )
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Pre-check for callers that answer unsafe input with a distinct status.
    pub fn is_unsafe(&self, url: &str) -> bool {
        guard::is_unsafe(url)
    }

    /// Returns the preview image reference for `url`, or `None`. Never fails.
    pub async fn resolve(&self, url: &str) -> Option<String> {
        self.resolve_outcome(url).await.into_image()
    }

    /// Like [`resolve`](Self::resolve) but keeps the reason a resolution found nothing.
    pub async fn resolve_outcome(&self, url: &str) -> Outcome {
        if let Some(cached) = self.cache.get(url) {
            tracing::debug!(%url, "cache hit");
            return match cached {
                Some(image) => Outcome::Found(image),
                None => Outcome::NotFound(Reason::Cached),
            };
        }

        let parsed = match guard::check(url) {
            Ok(parsed) => parsed,
            Err(r) => {
                tracing::debug!(%url, reason = %r, "input rejected");
                return Outcome::Rejected(r);
            }
        };

        let this = self.clone();
        let outcome = match tokio::task::spawn_blocking(move || this.resolve_blocking(parsed)).await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(%url, error = %e, "resolution worker failed");
                Outcome::NotFound(Reason::Internal)
            }
        };

        match &outcome {
            Outcome::Found(image) => self.cache.set(url, Some(image.clone())),
            Outcome::NotFound(reason) if reason.is_cacheable() => self.cache.set(url, None),
            _ => {}
        }
        tracing::info!(%url, outcome = %outcome.label(), "resolved");
        outcome
    }

    /// Network part of the pipeline, for an input that already passed the guard.
    ///
    /// Blocking; runs on the blocking pool from [`resolve_outcome`](Self::resolve_outcome).
    fn resolve_blocking(&self, url: Url) -> Outcome {
        let target = if wrapper::is_wrapper_url(&url) {
            let Some(destination) =
                wrapper::resolve_wrapper(&*self.transport, &url, self.limits.max_wrapper_bytes)
            else {
                return Outcome::NotFound(Reason::WrapperUnresolved);
            };
            if let Err(r) = guard::check_url(&destination) {
                tracing::debug!(wrapper = %url, %destination, reason = %r, "unsafe wrapper destination");
                return Outcome::NotFound(Reason::UnsafeDestination);
            }
            destination
        } else {
            url
        };

        let page = match redirect::fetch_following_redirects(
            &*self.transport,
            target,
            self.limits.hop_limit,
            self.limits.max_scan_bytes,
        ) {
            Ok(page) => page,
            Err(failure) => return Outcome::NotFound(failure.into()),
        };
        if !page.is_success() {
            return Outcome::NotFound(Reason::Status(page.status));
        }
        if !page.is_html() {
            tracing::debug!(url = %page.url, content_type = ?page.content_type, "skipping non-HTML body");
            return Outcome::NotFound(Reason::NotHtml);
        }

        let image = extract::extract_preview_image_within(&page.body, self.limits.max_scan_bytes)
            .and_then(|image| extract::absolutize(&page.url, &image));
        match image {
            Some(image) => Outcome::Found(image),
            None => {
                tracing::debug!(
                    url = %page.url,
                    scanned = page.body.len(),
                    truncated = page.truncated,
                    "no preview image in scanned prefix"
                );
                Outcome::NotFound(Reason::NoImage)
            }
        }
    }
}

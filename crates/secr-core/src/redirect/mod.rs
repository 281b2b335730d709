//! Bounded redirect walker.
//!
//! Follows HTTP redirects by hand so that every target is checked by the
//! guard before it is fetched. Modelled as a small state machine:
//!
//! ```text
//! Resolving(url, hops_left) --3xx + safe Location--> Resolving(next, hops_left - 1)
//! Resolving(url, hops_left) --non-3xx-------------> Terminal(page)
//! Resolving(url, hops_left) --anything else-------> Failed(reason)
//! Resolving(_, 0) ----------------------------------> Failed(TooManyRedirects)
//! ```
//!
//! `hop_limit` counts fetches: with the default of 5, a chain of up to four
//! redirects can still reach its destination.

mod failure;

pub use failure::WalkFailure;

use url::Url;

use crate::fetch::{GetOptions, Page, RedirectMode, Transport};
use crate::guard;

/// Default number of fetches per walk.
pub const DEFAULT_HOP_LIMIT: u32 = 5;

#[derive(Debug)]
enum WalkState {
    Resolving { url: Url, hops_left: u32 },
    Terminal(Page),
    Failed(WalkFailure),
}

/// Fetches `url`, following up to `hop_limit - 1` redirects, each re-validated by the guard.
///
/// Returns the first non-redirect response, whatever its status. Failures are
/// returned as values; nothing is fetched after a failure is decided.
pub fn fetch_following_redirects<T: Transport + ?Sized>(
    transport: &T,
    url: Url,
    hop_limit: u32,
    max_body_bytes: usize,
) -> Result<Page, WalkFailure> {
    let opts = GetOptions {
        redirects: RedirectMode::Manual,
        max_body_bytes,
    };

    let mut state = match guard::check_url(&url) {
        Ok(()) => WalkState::Resolving {
            url,
            hops_left: hop_limit,
        },
        Err(r) => WalkState::Failed(WalkFailure::Unsafe(r)),
    };

    loop {
        state = match state {
            WalkState::Resolving { hops_left: 0, url } => {
                tracing::debug!(%url, "hop limit reached");
                WalkState::Failed(WalkFailure::TooManyRedirects)
            }
            WalkState::Resolving { url, hops_left } => step(transport, url, hops_left, &opts),
            WalkState::Terminal(page) => return Ok(page),
            WalkState::Failed(reason) => return Err(reason),
        };
    }
}

fn step<T: Transport + ?Sized>(
    transport: &T,
    url: Url,
    hops_left: u32,
    opts: &GetOptions,
) -> WalkState {
    let page = match transport.get(&url, opts) {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(%url, error = %e, "fetch failed");
            return WalkState::Failed(WalkFailure::Fetch(e.kind()));
        }
    };

    if !page.is_redirect() {
        return WalkState::Terminal(page);
    }

    let Some(location) = page.location.as_deref() else {
        return WalkState::Failed(WalkFailure::MissingLocation(page.status));
    };
    let next = match url.join(location) {
        Ok(next) => next,
        Err(_) => return WalkState::Failed(WalkFailure::BadLocation(location.to_string())),
    };
    if let Err(r) = guard::check_url(&next) {
        tracing::debug!(from = %url, to = %next, reason = %r, "unsafe redirect target");
        return WalkState::Failed(WalkFailure::Unsafe(r));
    }

    tracing::debug!(from = %url, to = %next, status = page.status, "following redirect");
    WalkState::Resolving {
        url: next,
        hops_left: hops_left - 1,
    }
}

//! SECR: SSRF-safe resolution of preview images for caller-supplied URLs.
//!
//! The entry point is [`PreviewResolver`]; [`guard::is_unsafe`] is the
//! matching pre-check for callers that reject unsafe input up front.

pub mod config;
pub mod logging;

pub mod cache;
pub mod extract;
pub mod fetch;
pub mod guard;
pub mod redirect;
pub mod resolver;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod testing;

pub use resolver::{Outcome, PreviewResolver, Reason};

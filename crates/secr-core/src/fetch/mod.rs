//! Outbound HTTP GET.
//!
//! A [`Transport`] performs exactly one request per call. Redirects are either
//! left to the caller ([`RedirectMode::Manual`], used by the redirect walker so
//! every hop can be re-validated) or followed by the transport
//! ([`RedirectMode::Follow`], used only for the best-effort wrapper probe,
//! `http`/`https` targets only).
//! The body is streamed into memory and reading stops once
//! [`GetOptions::max_body_bytes`] have been consumed.

mod curl_transport;
mod error;
mod parse;

pub use curl_transport::CurlTransport;
pub use error::{FetchError, FetchErrorKind};

use url::Url;

/// Who handles 3xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Return 3xx responses as-is; the caller reads `Location`.
    Manual,
    /// Let the transport follow `http`/`https` redirects itself, unguarded.
    Follow,
}

/// Per-request options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOptions {
    pub redirects: RedirectMode,
    /// Body bytes kept; the transfer is cut off after this many.
    pub max_body_bytes: usize,
}

/// Response of a single GET.
#[derive(Debug, Clone)]
pub struct Page {
    /// Effective URL after any client-followed redirects.
    pub url: Url,
    pub status: u32,
    /// `Location` header of the last response, if present.
    pub location: Option<String>,
    /// `Content-Type` of the last response, if present.
    pub content_type: Option<String>,
    /// Body prefix, at most `max_body_bytes` long.
    pub body: Vec<u8>,
    /// True if the server had more body than we read.
    pub truncated: bool,
}

impl Page {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True unless the server declared a non-HTML `Content-Type`. A missing header counts as HTML.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(ct) => ct.to_ascii_lowercase().contains("html"),
            None => true,
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs one outbound GET. Implemented by [`CurlTransport`]; tests substitute fakes.
///
/// Blocking; call from `spawn_blocking` if used from async code.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url, opts: &GetOptions) -> Result<Page, FetchError>;
}

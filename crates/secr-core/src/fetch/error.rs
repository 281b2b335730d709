//! Fetch error type and its coarse classification for logging.

/// Error returned by a single GET (curl failure or no usable response).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// The transfer finished without an HTTP status line.
    #[error("no HTTP response from {0}")]
    NoResponse(String),
    /// Client-followed redirects did not end within the cap.
    #[error("too many redirects from {0}")]
    TooManyRedirects(String),
}

/// High-level classification of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused, DNS, TLS handshake, reset).
    Connection,
    /// Anything else.
    Other,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Curl(e) => classify_curl_error(e),
            FetchError::NoResponse(_) | FetchError::TooManyRedirects(_) => FetchErrorKind::Other,
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FetchErrorKind {
    if e.is_operation_timedout() {
        return FetchErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FetchErrorKind::Connection;
    }
    FetchErrorKind::Other
}

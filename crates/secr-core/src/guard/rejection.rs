/// Why the guard refused a URL. Carried internally for logs and tests; callers
/// outside the crate only ever observe "no value".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("URL could not be parsed")]
    Unparseable,
    #[error("scheme {0:?} is not http or https")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("loopback host {0}")]
    Loopback(String),
    #[error("private or link-local address {0}")]
    PrivateNetwork(String),
    #[error("bare hostname {0} (no public suffix)")]
    BareHostname(String),
}

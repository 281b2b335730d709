use crate::fetch::FetchErrorKind;
use crate::guard::Rejection;

/// Why a walk ended without a terminal response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkFailure {
    /// The start URL or a redirect target failed the guard.
    Unsafe(Rejection),
    /// A 3xx response without a `Location` header.
    MissingLocation(u32),
    /// `Location` could not be resolved against the current URL.
    BadLocation(String),
    /// Still redirecting after `hop_limit` fetches.
    TooManyRedirects,
    /// The request itself failed.
    Fetch(FetchErrorKind),
}

impl std::fmt::Display for WalkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkFailure::Unsafe(r) => write!(f, "unsafe target: {}", r),
            WalkFailure::MissingLocation(code) => write!(f, "HTTP {} without Location", code),
            WalkFailure::BadLocation(loc) => write!(f, "unresolvable Location {:?}", loc),
            WalkFailure::TooManyRedirects => write!(f, "too many redirects"),
            WalkFailure::Fetch(kind) => write!(f, "fetch failed ({:?})", kind),
        }
    }
}

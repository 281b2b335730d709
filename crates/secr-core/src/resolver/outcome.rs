use crate::guard::Rejection;
use crate::redirect::WalkFailure;

/// Result of one resolution, before it is collapsed at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page declares a preview image.
    Found(String),
    /// Resolution ran but produced no image.
    NotFound(Reason),
    /// The input URL failed the guard; nothing was fetched.
    Rejected(Rejection),
}

impl Outcome {
    /// The externally visible value: an image reference, or nothing.
    pub fn into_image(self) -> Option<String> {
        match self {
            Outcome::Found(image) => Some(image),
            Outcome::NotFound(_) | Outcome::Rejected(_) => None,
        }
    }

    /// Short machine-readable label, for logs and `--explain`.
    pub fn label(&self) -> String {
        match self {
            Outcome::Found(_) => "found".to_string(),
            Outcome::NotFound(reason) => format!("not_found: {}", reason),
            Outcome::Rejected(r) => format!("rejected: {}", r),
        }
    }
}

/// Why a resolution produced no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Served from the cache as a stored absence.
    Cached,
    /// Wrapper link whose destination could not be found.
    WrapperUnresolved,
    /// A discovered URL (redirect hop or wrapper destination) failed the guard.
    UnsafeDestination,
    /// Redirect chain exceeded the hop limit.
    TooManyRedirects,
    /// Redirect without a usable `Location`.
    BrokenRedirect,
    /// Network error or timeout.
    Unreachable,
    /// Terminal response was not 2xx.
    Status(u32),
    /// Terminal response declared a non-HTML content type; not scanned.
    NotHtml,
    /// Page fetched but no preview image declared within the scan window.
    NoImage,
    /// The worker running the fetch failed unexpectedly.
    Internal,
}

impl Reason {
    /// Whether this absence is definitive and may be cached.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Reason::Internal | Reason::Cached)
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Cached => write!(f, "cached absence"),
            Reason::WrapperUnresolved => write!(f, "wrapper destination not found"),
            Reason::UnsafeDestination => write!(f, "unsafe destination"),
            Reason::TooManyRedirects => write!(f, "too many redirects"),
            Reason::BrokenRedirect => write!(f, "broken redirect"),
            Reason::Unreachable => write!(f, "unreachable"),
            Reason::Status(code) => write!(f, "HTTP {}", code),
            Reason::NotHtml => write!(f, "not an HTML document"),
            Reason::NoImage => write!(f, "no preview image"),
            Reason::Internal => write!(f, "internal error"),
        }
    }
}

impl From<WalkFailure> for Reason {
    fn from(failure: WalkFailure) -> Self {
        match failure {
            WalkFailure::Unsafe(_) => Reason::UnsafeDestination,
            WalkFailure::MissingLocation(_) | WalkFailure::BadLocation(_) => Reason::BrokenRedirect,
            WalkFailure::TooManyRedirects => Reason::TooManyRedirects,
            WalkFailure::Fetch(_) => Reason::Unreachable,
        }
    }
}

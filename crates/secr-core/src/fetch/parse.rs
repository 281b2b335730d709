//! Parse HTTP response header lines collected by the curl header callback.

/// Headers of the last response in a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHeaders {
    pub location: Option<String>,
    pub content_type: Option<String>,
}

/// Parse collected header lines. When curl follows redirects it reports the
/// headers of every response; a new status line resets what was seen so far.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut out = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            out = ResponseHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("location") && !value.is_empty() {
                out.location = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string());
            }
        }
    }

    out
}

//! URL safety guard (SSRF denylist).
//!
//! Classifies a URL as safe or unsafe for an outbound fetch from its scheme and
//! literal host text only. No DNS resolution happens here: a public-looking
//! hostname that resolves to a private address at connect time passes the
//! guard (DNS rebinding is a known gap).
//!
//! Every URL the crate fetches goes through [`check_url`] first, including
//! redirect targets and wrapper destinations.

mod host;
mod rejection;

pub use rejection::Rejection;

use url::Url;

/// Returns true if `url` must not be fetched. Never fails; malformed input is unsafe.
pub fn is_unsafe(url: &str) -> bool {
    check(url).is_err()
}

/// Parses `url` and applies the guard rules, returning the parsed URL when safe.
pub fn check(url: &str) -> Result<Url, Rejection> {
    let parsed = Url::parse(url.trim()).map_err(|_| Rejection::Unparseable)?;
    check_url(&parsed)?;
    Ok(parsed)
}

/// Applies the guard rules to an already parsed URL. Rules run in order; the first match wins.
pub fn check_url(url: &Url) -> Result<(), Rejection> {
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Rejection::UnsupportedScheme(scheme.to_string()));
    }
    let host = url.host().ok_or(Rejection::MissingHost)?;
    host::check_host(&host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_hosts_are_safe() {
        assert!(!is_unsafe("https://example.com/article"));
        assert!(!is_unsafe("http://news.bbc.co.uk/path?q=1"));
        assert!(!is_unsafe("https://8.8.8.8/"));
        assert!(!is_unsafe("https://EXAMPLE.org:8443/x"));
    }

    #[test]
    fn non_http_schemes_are_unsafe() {
        assert_eq!(
            check("file:///etc/passwd").unwrap_err(),
            Rejection::UnsupportedScheme("file".to_string())
        );
        assert!(is_unsafe("ftp://example.com/file"));
        assert!(is_unsafe("gopher://example.com:70/"));
        assert!(is_unsafe("javascript:alert(1)"));
        assert!(is_unsafe("data:text/html,hi"));
    }

    #[test]
    fn malformed_input_is_unsafe() {
        assert_eq!(check("not a url").unwrap_err(), Rejection::Unparseable);
        assert!(is_unsafe(""));
        assert!(is_unsafe("http://"));
        assert!(is_unsafe("/relative/path"));
    }

    #[test]
    fn loopback_hosts_are_unsafe() {
        assert!(is_unsafe("http://localhost/"));
        assert!(is_unsafe("http://LOCALHOST:3000/admin"));
        assert!(is_unsafe("http://127.0.0.1/"));
        assert!(is_unsafe("http://0.0.0.0:8080/"));
        assert!(is_unsafe("http://[::1]/"));
        assert!(matches!(
            check("http://127.0.0.1/").unwrap_err(),
            Rejection::Loopback(_)
        ));
    }

    #[test]
    fn numeric_loopback_encodings_are_normalised_then_rejected() {
        // The URL parser canonicalises these to 127.0.0.1 before the guard sees them.
        assert!(is_unsafe("http://2130706433/"));
        assert!(is_unsafe("http://0x7f.0.0.1/"));
    }

    #[test]
    fn private_ipv4_ranges_are_unsafe() {
        assert!(is_unsafe("http://10.0.0.5/"));
        assert!(is_unsafe("http://172.16.0.1/"));
        assert!(is_unsafe("http://172.31.255.255/"));
        assert!(is_unsafe("http://192.168.1.1/"));
        assert!(is_unsafe("http://169.254.169.254/latest/meta-data/"));
        assert!(matches!(
            check("http://169.254.169.254/").unwrap_err(),
            Rejection::PrivateNetwork(_)
        ));
    }

    #[test]
    fn neighbours_of_private_ranges_are_safe() {
        assert!(!is_unsafe("http://172.15.0.1/"));
        assert!(!is_unsafe("http://172.32.0.1/"));
        assert!(!is_unsafe("http://192.169.0.1/"));
        assert!(!is_unsafe("http://11.0.0.1/"));
    }

    #[test]
    fn ipv6_private_prefixes_are_unsafe() {
        assert!(matches!(
            check("http://[fd12:3456::1]/").unwrap_err(),
            Rejection::PrivateNetwork(_)
        ));
        assert!(matches!(
            check("http://[fe80::1]/").unwrap_err(),
            Rejection::PrivateNetwork(_)
        ));
    }

    #[test]
    fn ipv4_mapped_ipv6_literals_are_unsafe() {
        for url in [
            "http://[::ffff:127.0.0.1]/",
            "http://[::ffff:7f00:1]/",
            "http://[0:0:0:0:0:ffff:127.0.0.1]:8080/admin",
        ] {
            assert!(matches!(check(url).unwrap_err(), Rejection::Loopback(_)), "{url}");
        }
        for url in [
            "http://[::ffff:169.254.169.254]/latest/meta-data/",
            "http://[::ffff:a9fe:a9fe]/",
            "http://[::ffff:10.0.0.1]/",
            "http://[::ffff:192.168.1.1]/",
        ] {
            assert!(matches!(check(url).unwrap_err(), Rejection::PrivateNetwork(_)), "{url}");
        }
        assert!(is_unsafe("http://[::ffff:8.8.8.8]/"));
    }

    #[test]
    fn domains_sharing_ipv6_prefix_letters_are_safe() {
        assert!(!is_unsafe("https://fda.gov/"));
        assert!(!is_unsafe("https://fe80.example.com/"));
    }

    #[test]
    fn bare_hostnames_are_unsafe() {
        assert!(matches!(
            check("http://metadata/").unwrap_err(),
            Rejection::BareHostname(_)
        ));
        assert!(is_unsafe("http://redis:6379/"));
        assert!(is_unsafe("http://[2001:db8::1]/"));
    }

    #[test]
    fn check_returns_parsed_url() {
        let url = check("  https://example.com/a?b=c  ").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a");
    }
}

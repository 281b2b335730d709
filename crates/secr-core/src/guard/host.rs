//! Host classification on the literal host text.

use url::Host;

use super::Rejection;

const LOOPBACK_NAMES: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1", "[::1]"];

/// IPv6 unique-local (`fd00::/8`) and link-local (`fe80::/10`) text prefixes.
const PRIVATE_IPV6_PREFIXES: &[&str] = &["fd", "fe80"];

pub(super) fn check_host(host: &Host<&str>) -> Result<(), Rejection> {
    // IPv6 text uses the url crate's hex serialisation, so `[::ffff:127.0.0.1]`
    // reads as `[::ffff:7f00:1]` here.
    let text = match host {
        Host::Domain(d) => d.to_ascii_lowercase(),
        _ => host.to_string(),
    };
    let embedded_v4 = match host {
        Host::Ipv4(addr) => Some(*addr),
        Host::Ipv6(addr) => addr.to_ipv4(),
        Host::Domain(_) => None,
    };

    let loopback_v4 = embedded_v4.is_some_and(|v4| v4.is_loopback() || v4.is_unspecified());
    if loopback_v4 || LOOPBACK_NAMES.contains(&text.as_str()) {
        return Err(Rejection::Loopback(text));
    }

    if let Some(v4) = embedded_v4 {
        if is_private_ipv4_text(&v4.to_string()) {
            return Err(Rejection::PrivateNetwork(text));
        }
    }
    if let Host::Ipv6(addr) = host {
        let bare = addr.to_string();
        if PRIVATE_IPV6_PREFIXES.iter().any(|p| bare.starts_with(p)) {
            return Err(Rejection::PrivateNetwork(text));
        }
    }

    if !text.contains('.') {
        return Err(Rejection::BareHostname(text));
    }
    Ok(())
}

/// `10/8`, `172.16/12`, `192.168/16` and `169.254/16`, matched on dotted octets.
fn is_private_ipv4_text(dotted: &str) -> bool {
    let mut octets = dotted.split('.');
    let first = octets.next().unwrap_or("");
    let second = octets.next().and_then(|s| s.parse::<u8>().ok());
    match (first, second) {
        ("10", _) => true,
        ("172", Some(n)) => (16..=31).contains(&n),
        ("192", Some(168)) => true,
        ("169", Some(254)) => true,
        _ => false,
    }
}

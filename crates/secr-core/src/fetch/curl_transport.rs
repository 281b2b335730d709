//! libcurl-backed [`Transport`].
//!
//! libcurl never follows redirects itself. In [`RedirectMode::Follow`] the
//! transport re-issues the request for each `Location`, up to
//! [`CLIENT_MAX_REDIRECTS`] times, and only for `http`/`https` targets; any other
//! scheme ends the chain with the 3xx response as the result. Those hops are not
//! run through the guard: callers must validate the effective URL before use.

use std::str;
use std::time::Duration;

use curl::easy::{Easy, List};
use url::Url;

use super::parse::parse_headers;
use super::{FetchError, GetOptions, Page, RedirectMode, Transport};
use crate::config::SecrConfig;

/// Redirects followed in [`RedirectMode::Follow`].
const CLIENT_MAX_REDIRECTS: u32 = 10;

/// Blocking GET over libcurl, one `Easy` handle per request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    timeout: Duration,
    user_agent: String,
    /// `host:port:address` entries passed to `CURLOPT_RESOLVE`.
    pinned_hosts: Vec<String>,
}

impl CurlTransport {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
            pinned_hosts: Vec::new(),
        }
    }

    pub fn from_config(cfg: &SecrConfig) -> Self {
        Self::new(cfg.timeout(), cfg.user_agent.clone())
    }

    /// Connects `host:port` to `address` instead of resolving it through DNS.
    ///
    /// The guard still sees the original hostname. Integration tests use this
    /// to reach a loopback server under a public-looking name.
    pub fn with_pinned_host(mut self, host: &str, port: u16, address: &str) -> Self {
        self.pinned_hosts.push(format!("{}:{}:{}", host, port, address));
        self
    }

    fn configure(&self, easy: &mut Easy, url: &Url) -> Result<(), curl::Error> {
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;
        // Advertise every encoding libcurl can decode; the byte cap applies to decoded bytes.
        easy.accept_encoding("")?;

        let mut headers = List::new();
        headers.append("Accept: text/html,application/xhtml+xml;q=0.9,*/*;q=0.5")?;
        easy.http_headers(headers)?;

        if !self.pinned_hosts.is_empty() {
            let mut list = List::new();
            for entry in &self.pinned_hosts {
                list.append(entry)?;
            }
            easy.resolve(list)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &Url, opts: &GetOptions) -> Result<Page, FetchError> {
        match opts.redirects {
            RedirectMode::Manual => self.get_once(url, opts.max_body_bytes),
            RedirectMode::Follow => self.get_following(url, opts.max_body_bytes),
        }
    }
}

impl CurlTransport {
    fn get_following(&self, url: &Url, max_body_bytes: usize) -> Result<Page, FetchError> {
        let mut current = url.clone();
        for _ in 0..=CLIENT_MAX_REDIRECTS {
            let page = self.get_once(&current, max_body_bytes)?;
            let next = match (page.is_redirect(), page.location.as_deref()) {
                (true, Some(location)) => current.join(location).ok(),
                _ => None,
            };
            match next {
                Some(next) if matches!(next.scheme(), "http" | "https") => {
                    tracing::trace!(from = %current, to = %next, "client redirect");
                    current = next;
                }
                Some(next) => {
                    tracing::debug!(from = %current, to = %next, "not following non-HTTP redirect");
                    return Ok(page);
                }
                None => return Ok(page),
            }
        }
        Err(FetchError::TooManyRedirects(url.to_string()))
    }

    fn get_once(&self, url: &Url, limit: usize) -> Result<Page, FetchError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;

        let mut easy = Easy::new();
        self.configure(&mut easy, url)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                let room = limit.saturating_sub(body.len());
                if data.len() > room {
                    body.extend_from_slice(&data[..room]);
                    truncated = true;
                    return Ok(0); // abort transfer, we have enough
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        match performed {
            Ok(()) => {}
            // Our own cut-off surfaces as a write error; the prefix is what we wanted.
            Err(e) if truncated && e.is_write_error() => {}
            Err(e) => return Err(FetchError::Curl(e)),
        }

        let status = easy.response_code()?;
        if status == 0 {
            return Err(FetchError::NoResponse(url.to_string()));
        }

        let effective = easy
            .effective_url()?
            .and_then(|u| Url::parse(u).ok())
            .unwrap_or_else(|| url.clone());
        let headers = parse_headers(&header_lines);

        tracing::trace!(
            url = %url,
            effective = %effective,
            status,
            bytes = body.len(),
            truncated,
            "GET complete"
        );

        Ok(Page {
            url: effective,
            status,
            location: headers.location,
            content_type: headers.content_type,
            body,
            truncated,
        })
    }
}

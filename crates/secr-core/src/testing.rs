//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use url::Url;

use crate::fetch::{FetchError, GetOptions, Page, RedirectMode, Transport};

#[derive(Debug, Clone)]
pub(crate) struct Canned {
    pub status: u32,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Serves canned responses by exact URL and records every request.
///
/// Unknown URLs fail like an unreachable host. In `Follow` mode the fake
/// follows its own canned redirects, like libcurl would.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, Canned>,
    requests: Mutex<Vec<(String, RedirectMode)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Canned {
                status: 200,
                location: None,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    /// A 200 response with an explicit (or absent) `Content-Type`.
    pub fn typed(mut self, url: &str, content_type: Option<&str>, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Canned {
                status: 200,
                location: None,
                content_type: content_type.map(str::to_string),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u32) -> Self {
        self.routes.insert(
            url.to_string(),
            Canned {
                status,
                location: None,
                content_type: None,
                body: Vec::new(),
            },
        );
        self
    }

    pub fn redirect(mut self, url: &str, status: u32, location: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Canned {
                status,
                location: Some(location.to_string()),
                content_type: None,
                body: Vec::new(),
            },
        );
        self
    }

    /// Every requested URL, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(u, _)| u.clone())
            .collect()
    }

    pub fn requests_with_mode(&self) -> Vec<(String, RedirectMode)> {
        self.requests.lock().unwrap().clone()
    }

    fn lookup(&self, url: &Url) -> Result<&Canned, FetchError> {
        self.routes
            .get(url.as_str())
            .ok_or_else(|| FetchError::Curl(curl::Error::new(7)))
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &Url, opts: &GetOptions) -> Result<Page, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), opts.redirects));

        let mut current = url.clone();
        let mut canned = self.lookup(&current)?;
        if opts.redirects == RedirectMode::Follow {
            let mut hops = 0;
            while let (true, Some(loc)) = ((300..400).contains(&canned.status), &canned.location) {
                hops += 1;
                if hops > 10 {
                    return Err(FetchError::TooManyRedirects(url.to_string()));
                }
                current = current.join(loc).map_err(|_| FetchError::NoResponse(loc.clone()))?;
                canned = self.lookup(&current)?;
            }
        }

        let truncated = canned.body.len() > opts.max_body_bytes;
        let body = canned.body[..canned.body.len().min(opts.max_body_bytes)].to_vec();
        Ok(Page {
            url: current,
            status: canned.status,
            location: canned.location.clone(),
            content_type: canned.content_type.clone(),
            body,
            truncated,
        })
    }
}

//! Blocking HTTP GET adapter.

use crate::error::Result;
use std::time::Duration;
use url::Url;

/// A response as seen by the client, before status classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests. Implementations only fail on network-level errors;
/// non-2xx statuses are returned as a [`RawResponse`] and classified by the
/// client.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<RawResponse> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<RawResponse> {
        tracing::debug!(url = %url, "GET");
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status();
        let reason = reason_phrase(status, resp.extensions());
        let body = resp.text()?;
        Ok(RawResponse { status: status.as_u16(), reason, body })
    }
}

/// The phrase from the server's status line. hyper only records it when it
/// differs from the canonical one, so fall back to that.
fn reason_phrase(status: reqwest::StatusCode, extensions: &http::Extensions) -> String {
    extensions
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
        .or_else(|| status.canonical_reason())
        .unwrap_or("")
        .to_string()
}

/// Options for [`HttpTransport`]. No timeout is applied unless one is set.
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        HttpTransportBuilder {
            timeout: None,
            user_agent: format!("ssllabs-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()?;
        Ok(HttpTransport { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let r = |status| RawResponse { status, reason: String::new(), body: String::new() };
        assert!(r(200).is_success());
        assert!(r(204).is_success());
        assert!(!r(301).is_success());
        assert!(!r(429).is_success());
    }

    #[test]
    fn reason_prefers_server_phrase() {
        let mut ext = http::Extensions::new();
        ext.insert(hyper::ext::ReasonPhrase::from_static(b"Site is overloaded"));
        let status = reqwest::StatusCode::from_u16(529).unwrap();
        assert_eq!(reason_phrase(status, &ext), "Site is overloaded");
    }

    #[test]
    fn reason_falls_back_to_canonical() {
        let ext = http::Extensions::new();
        assert_eq!(reason_phrase(reqwest::StatusCode::TOO_MANY_REQUESTS, &ext), "Too Many Requests");
        let status = reqwest::StatusCode::from_u16(529).unwrap();
        assert_eq!(reason_phrase(status, &ext), "");
    }

    #[test]
    fn builder_defaults() {
        let b = HttpTransportBuilder::default();
        assert!(b.timeout.is_none());
        assert!(b.user_agent.starts_with("ssllabs-client/"));
        let b = b.timeout(Duration::from_secs(5)).user_agent("scanner/1");
        assert_eq!(b.timeout, Some(Duration::from_secs(5)));
        assert_eq!(b.user_agent, "scanner/1");
    }
}

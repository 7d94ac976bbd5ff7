// Network fetcher seam and fetch policy helpers
// Author: kelexine (https://github.com/kelexine)

use crate::cache::CachedResponse;
use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use std::time::Duration;

/// A response fetched from the network.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// How a fetch was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from the cache store.
    Hit,
    /// Fetched from the network on a cache miss.
    Miss,
    /// Excluded from caching; forwarded to the network untouched.
    Bypass,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchOutcome::Hit => "hit",
            FetchOutcome::Miss => "miss",
            FetchOutcome::Bypass => "bypass",
        }
    }
}

/// The response handed back to the interception endpoint.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub outcome: FetchOutcome,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl FetchResult {
    pub fn hit(entry: CachedResponse) -> Self {
        Self {
            outcome: FetchOutcome::Hit,
            status: entry.status,
            headers: entry.headers,
            body: entry.body,
        }
    }

    pub fn miss(resp: FetchedResponse) -> Self {
        Self {
            outcome: FetchOutcome::Miss,
            status: resp.status,
            headers: resp.headers,
            body: resp.body,
        }
    }

    pub fn bypass(resp: FetchedResponse) -> Self {
        Self {
            outcome: FetchOutcome::Bypass,
            status: resp.status,
            headers: resp.headers,
            body: resp.body,
        }
    }
}

/// Outbound fetch seam so the fetch policy is testable without a network.
#[async_trait]
pub trait RemoteFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse>;
}

/// Production fetcher backed by reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteFetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;
        Ok(FetchedResponse {
            status,
            headers,
            body,
        })
    }
}

/// Resolve a request URL against the upstream base. Absolute URLs pass
/// through; relative ones join the base.
pub fn resolve_url(raw: &str, base: &Url) -> Result<Url> {
    base.join(raw)
        .map_err(|e| GatewayError::InvalidRequest(format!("unresolvable URL '{}': {}", raw, e)))
}

/// Whether the URL matches any excluded host substring. Matches on the
/// raw URL text, as the excluded third-party provider embeds its host in
/// every resource URL it serves.
pub fn is_excluded(url: &str, excluded_hosts: &[String]) -> bool {
    excluded_hosts.iter().any(|host| url.contains(host.as_str()))
}

/// Whether the URL shares scheme, host, and port with the upstream base.
/// The analog of a non-opaque "basic" response.
pub fn is_same_origin(url: &Url, base: &Url) -> bool {
    url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default()
}

/// Whether a network response may be written to the cache: plain
/// success, same origin.
pub fn is_cacheable(status: u16, same_origin: bool) -> bool {
    status == 200 && same_origin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:8000").unwrap()
    }

    #[test]
    fn test_resolve_relative_url() {
        let url = resolve_url("/styles.css", &base()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/styles.css");
    }

    #[test]
    fn test_resolve_absolute_url_passes_through() {
        let url = resolve_url("https://fonts.googleapis.com/css2?family=Roboto", &base()).unwrap();
        assert_eq!(url.host_str(), Some("fonts.googleapis.com"));
    }

    #[test]
    fn test_exclusion_is_substring_match() {
        let excluded = vec!["powerbi.com".to_string()];
        assert!(is_excluded("https://app.powerbi.com/view?r=abc", &excluded));
        // Substring semantics: a path mentioning the host also matches
        assert!(is_excluded("http://127.0.0.1:8000/docs/powerbi.com.html", &excluded));
        assert!(!is_excluded("http://127.0.0.1:8000/styles.css", &excluded));
    }

    #[test]
    fn test_same_origin() {
        let same = Url::parse("http://127.0.0.1:8000/script.js").unwrap();
        let other_port = Url::parse("http://127.0.0.1:9000/script.js").unwrap();
        let other_host = Url::parse("http://localhost:8000/script.js").unwrap();

        assert!(is_same_origin(&same, &base()));
        assert!(!is_same_origin(&other_port, &base()));
        assert!(!is_same_origin(&other_host, &base()));
    }

    #[test]
    fn test_cacheable_requires_plain_success() {
        assert!(is_cacheable(200, true));
        assert!(!is_cacheable(200, false));
        assert!(!is_cacheable(404, true));
        assert!(!is_cacheable(301, true));
    }
}

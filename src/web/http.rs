// src/web/http.rs
// =============================================================================
// Downloads pages over HTTP(S).
//
// Key functionality:
// - One reqwest Client reused for every request (connection pooling)
// - Browser-like User-Agent header (some sites refuse unknown clients)
// - Per-request timeout (30 seconds unless configured otherwise)
// - Non-2xx responses and transport failures become typed errors
//
// Rust concepts:
// - async/await: the fetch suspends while waiting on the network
// - Result<T, E>: every failure mode is a value, never a panic
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::Fetcher;
use crate::error::{CrawlError, FetchErrorKind};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Redirects followed before giving up on a URL
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), categorize_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::fetch(
                url.as_str(),
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        // A body that times out or breaks mid-stream is still a fetch failure
        response
            .text()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), categorize_error(&e)))
    }
}

// Categorizes the error types reqwest can give us:
// - Network timeout
// - Redirect loop / too many hops
// - Connection failure (DNS, refused, unreachable)
// - Anything else (TLS, decoding)
fn categorize_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_redirect() {
        FetchErrorKind::TooManyRedirects
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else {
        FetchErrorKind::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new(DEFAULT_USER_AGENT, timeout).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let body = fetcher(DEFAULT_TIMEOUT)
            .fetch(&url(&server, "/page"))
            .await
            .unwrap();
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher(DEFAULT_TIMEOUT)
            .fetch(&url(&server, "/missing"))
            .await
            .unwrap_err();
        match err {
            CrawlError::Fetch { kind, .. } => assert_eq!(kind, FetchErrorKind::Status(404)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let err = fetcher(Duration::from_millis(50))
            .fetch(&url(&server, "/slow"))
            .await
            .unwrap_err();
        match err {
            CrawlError::Fetch { kind, .. } => assert_eq!(kind, FetchErrorKind::Timeout),
            other => panic!("unexpected error: {other}"),
        }
    }
}

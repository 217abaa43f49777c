// src/web/mod.rs
// =============================================================================
// Everything that touches the web on behalf of the crawler.
//
// Submodules:
// - http: downloads pages (HttpFetcher)
// - html: pulls href values out of downloaded HTML (HtmlLinkExtractor)
//
// The crawl loop only sees the two traits below, so tests can swap in an
// in-memory "web" without a network.
// =============================================================================

mod html;
mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::CrawlError;

pub use html::HtmlLinkExtractor;
pub use http::{HttpFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

// Downloads a page and returns its body as text.
// Non-2xx responses, timeouts and network failures are all errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError>;
}

// Returns the raw href of every <a> that has one, in document order.
// The hrefs are NOT resolved; that's the normalizer's job.
pub trait LinkExtractor: Send + Sync {
    fn extract_hrefs(&self, html: &str) -> Result<Vec<String>, CrawlError>;
}

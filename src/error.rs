// src/error.rs
// =============================================================================
// Typed errors for the crawl engine.
//
// The crawl loop never lets one of these escape a single iteration: each one
// is turned into a per-page outcome in the report. The only place a
// CrawlError stops the run is when the output directory can't be prepared
// before the first fetch.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[source]: keeps the underlying io::Error in the error chain
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// An href or seed that can't be turned into an absolute http(s) URL
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    /// The page could not be downloaded
    #[error("failed to fetch {url}: {kind}")]
    Fetch { url: String, kind: FetchErrorKind },

    /// Links could not be extracted from a downloaded page
    #[error("failed to parse links: {0}")]
    Parse(String),

    /// Output directory or page file could not be written
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Why a fetch failed. Mirrors the categories a browser would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Server answered with a non-2xx status
    Status(u16),
    /// Request exceeded the per-request timeout
    Timeout,
    /// Could not connect (DNS, refused, unreachable)
    Connect,
    /// Redirect chain exceeded the client's limit
    TooManyRedirects,
    /// Anything else (TLS, body decoding, ...)
    Other(String),
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::Status(code) => write!(f, "HTTP {}", code),
            FetchErrorKind::Timeout => write!(f, "request timed out"),
            FetchErrorKind::Connect => write!(f, "connection failed"),
            FetchErrorKind::TooManyRedirects => write!(f, "too many redirects"),
            FetchErrorKind::Other(message) => write!(f, "{}", message),
        }
    }
}

impl CrawlError {
    pub fn fetch(url: impl Into<String>, kind: FetchErrorKind) -> Self {
        CrawlError::Fetch {
            url: url.into(),
            kind,
        }
    }

    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Storage {
            path: path.into(),
            source,
        }
    }
}

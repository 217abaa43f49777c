// src/crawl/report.rs
// =============================================================================
// Collects what happened to every page the crawler attempted.
//
// The reporter makes no decisions. The controller tells it about each page
// (saved, failed to download, ...) and at the end it hands back a CrawlReport
// with the totals. When `echo` is on it also prints a progress line per page.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Downloaded and saved; `links_queued` new frontier items came from it
    Success {
        saved_path: PathBuf,
        links_queued: usize,
    },
    /// Downloaded and saved, but no links could be extracted
    ParseError { saved_path: PathBuf, message: String },
    /// Download failed (status, timeout, network)
    FetchError { message: String },
    /// Downloaded but the file could not be written
    StorageError { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    pub url: String,
    pub depth: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl CrawlResult {
    // A page counts as fetched whenever it made it to disk
    pub fn is_fetched(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Success { .. } | Outcome::ParseError { .. }
        )
    }
}

// End-of-run summary
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    pub results: Vec<CrawlResult>,
}

impl CrawlReport {
    pub fn failures(&self) -> impl Iterator<Item = &CrawlResult> {
        self.results.iter().filter(|r| !r.is_fetched())
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

pub struct Reporter {
    results: Vec<CrawlResult>,
    started: Instant,
    echo: bool,
}

impl Reporter {
    pub fn new(echo: bool) -> Self {
        Self {
            results: Vec::new(),
            started: Instant::now(),
            echo,
        }
    }

    pub fn record(&mut self, result: CrawlResult) {
        if self.echo {
            println!("{}", progress_line(&result));
        }
        self.results.push(result);
    }

    pub fn fetched(&self) -> usize {
        self.results.iter().filter(|r| r.is_fetched()).count()
    }

    pub fn finish(self, seed: &str) -> CrawlReport {
        let attempted = self.results.len();
        let succeeded = self.fetched();
        CrawlReport {
            seed: seed.to_string(),
            attempted,
            succeeded,
            failed: attempted - succeeded,
            elapsed_ms: self.started.elapsed().as_millis() as u64,
            results: self.results,
        }
    }
}

fn progress_line(result: &CrawlResult) -> String {
    match &result.outcome {
        Outcome::Success { saved_path, .. } => format!(
            "  Saved [depth {}]: {} -> {}",
            result.depth,
            result.url,
            saved_path.display()
        ),
        Outcome::ParseError { saved_path, message } => format!(
            "  Saved [depth {}]: {} -> {} (no links: {})",
            result.depth,
            result.url,
            saved_path.display(),
            message
        ),
        Outcome::FetchError { message } | Outcome::StorageError { message } => {
            format!("  Failed [depth {}]: {} ({})", result.depth, result.url, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(url: &str) -> CrawlResult {
        CrawlResult {
            url: url.to_string(),
            depth: 0,
            outcome: Outcome::Success {
                saved_path: PathBuf::from("downloads/a.html"),
                links_queued: 2,
            },
        }
    }

    fn failed(url: &str) -> CrawlResult {
        CrawlResult {
            url: url.to_string(),
            depth: 1,
            outcome: Outcome::FetchError {
                message: "HTTP 500".to_string(),
            },
        }
    }

    #[test]
    fn test_report_totals() {
        let mut reporter = Reporter::new(false);
        reporter.record(saved("https://a.com/"));
        reporter.record(failed("https://a.com/x"));
        reporter.record(CrawlResult {
            url: "https://a.com/y".to_string(),
            depth: 1,
            outcome: Outcome::ParseError {
                saved_path: PathBuf::from("downloads/y.html"),
                message: "bad markup".to_string(),
            },
        });
        assert_eq!(reporter.fetched(), 2);

        let report = reporter.finish("https://a.com/");
        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert!(report.has_failures());
        let failures: Vec<_> = report.failures().map(|r| r.url.as_str()).collect();
        assert_eq!(failures, vec!["https://a.com/x"]);
    }

    #[test]
    fn test_result_serializes_flat() {
        let json = serde_json::to_value(failed("https://a.com/x")).unwrap();
        assert_eq!(json["outcome"], "fetch_error");
        assert_eq!(json["message"], "HTTP 500");
        assert_eq!(json["url"], "https://a.com/x");
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(
            progress_line(&failed("https://a.com/x")),
            "  Failed [depth 1]: https://a.com/x (HTTP 500)"
        );
        assert!(progress_line(&saved("https://a.com/")).starts_with("  Saved [depth 0]"));
    }
}

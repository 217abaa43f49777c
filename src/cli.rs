// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using a
// plain Rust struct and attributes (the #[...] things). Every field becomes a
// flag; defaults and validation live right next to the field.
//
// The parsed Cli is turned into a CrawlConfig before crawling starts, so the
// crawl engine never sees clap types.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::crawl::{CrawlConfig, DEFAULT_MAX_LINKS_PER_PAGE};
use crate::web::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

const DEFAULT_FAN_OUT: u64 = DEFAULT_MAX_LINKS_PER_PAGE as u64;

#[derive(Parser, Debug)]
#[command(
    name = "page-harvester",
    version = "0.1.0",
    about = "Crawl a website breadth-first and save every page to disk",
    long_about = "page-harvester starts at a URL, follows links breadth-first up to a depth \
                  and page limit, and saves each page it downloads as an .html file."
)]
pub struct Cli {
    /// Start URL for the crawl (e.g., https://example.com)
    #[arg(short, long)]
    pub url: String,

    /// How many link hops to follow from the start URL
    ///
    /// Depth 0 = just the start page
    /// Depth 1 = start page + the pages it links to
    #[arg(short, long, default_value_t = 2)]
    pub depth: usize,

    /// Directory the downloaded pages are written to
    #[arg(short, long, default_value = "downloads")]
    pub output: PathBuf,

    /// Maximum number of pages to download
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    /// Maximum number of new links taken from a single page
    #[arg(long, default_value_t = DEFAULT_FAN_OUT, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_links_per_page: u64,

    /// Number of pages downloaded at the same time (1 = strictly in order)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=64))]
    pub workers: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Output the final report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log debug details (skipped URLs, link counts) to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::new(self.depth, self.max_pages as usize);
        config.max_links_per_page = self.max_links_per_page as usize;
        config.workers = self.workers as usize;
        // Progress lines would corrupt JSON on stdout
        config.echo_progress = !self.json;
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What does value_parser!(u64).range(1..) do?
//    - clap parses the flag as a u64 and rejects values outside the range
//    - `--max-pages 0` fails with a usage error before anything runs
//    - The field stays u64 and we convert to usize in crawl_config()
//
// 2. Why #[arg(short, long)]?
//    - short = -u, long = --url (names are taken from the field name)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["page-harvester", "--url", "https://example.com"]).unwrap();
        assert_eq!(cli.depth, 2);
        assert_eq!(cli.max_pages, 10);
        assert_eq!(cli.output, PathBuf::from("downloads"));
        assert_eq!(cli.workers, 1);
        assert_eq!(cli.request_timeout(), Duration::from_secs(30));
        assert_eq!(cli.user_agent, "Mozilla/5.0");

        let config = cli.crawl_config();
        assert_eq!(config.budget.max_depth, 2);
        assert_eq!(config.budget.max_pages, 10);
        assert_eq!(config.max_links_per_page, 10);
        assert!(config.echo_progress);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "page-harvester", "-u", "https://example.com", "-d", "1", "-o", "out", "-m", "5",
        ])
        .unwrap();
        assert_eq!(cli.depth, 1);
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.max_pages, 5);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["page-harvester"]).is_err());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let result =
            Cli::try_parse_from(["page-harvester", "--url", "https://x.com", "--max-pages", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_disables_progress_lines() {
        let cli =
            Cli::try_parse_from(["page-harvester", "--url", "https://x.com", "--json"]).unwrap();
        assert!(!cli.crawl_config().echo_progress);
    }
}

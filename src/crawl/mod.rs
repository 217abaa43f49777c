// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Depth limit and page-count limit (the crawl "budget")
// - Never fetches the same page twice in a run
// - At most N new links taken from any single page
// - Per-page results collected into a report instead of aborting the run
//
// Submodules:
// - normalize: href + page URL -> absolute URL (or nothing)
// - frontier: the work queue and the visited set
// - controller: the crawl loop itself
// - report: per-page outcomes and the end-of-run summary
// =============================================================================

mod controller;
mod frontier;
mod normalize;
mod report;

// Re-export the public API so callers can write `crawl::Crawler`
pub use controller::{CrawlConfig, Crawler, DEFAULT_MAX_LINKS_PER_PAGE};
pub use report::{CrawlReport, CrawlResult, Outcome};

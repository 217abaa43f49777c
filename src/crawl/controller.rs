// src/crawl/controller.rs
// =============================================================================
// The crawl loop: breadth-first traversal bounded by depth and page count.
//
// How it works:
// 1. Start with the seed URL (depth 0) in the frontier
// 2. Stop when the frontier is empty or `max_pages` pages have been saved
// 3. Pop the next item; skip it if it's malformed, already visited, or deeper
//    than `max_depth`
// 4. Download it. On failure record the error and move on; the URL is NOT
//    marked visited, so another link to it can retry it later
// 5. On success mark it visited, save it, and (only if depth < max_depth)
//    queue up to `max_links_per_page` new links found on it at depth + 1
//
// Every per-page failure becomes a CrawlResult. The only error `run` returns
// is the output directory failing to be created, before anything is fetched.
//
// Workers:
// With `workers == 1` (the default) one page is fetched at a time and the
// order is strict FIFO. With more workers the loop keeps several downloads in
// flight. A URL is "claimed" before its download starts, and a claim is only
// granted while `visited + in_flight < max_pages`, so the number of saved
// pages can never pass the budget. What changes with more workers:
// - pages complete in whatever order the network returns them
// - which URLs get skipped near the budget boundary is not deterministic
// - a duplicate frontier entry popped while that URL is in flight is
//   dropped instead of being kept around as a retry
//
// Rust concepts:
// - FuturesUnordered: a set of futures polled together, yielding each one
//   as it finishes
// - Generics with trait bounds: the loop works with any Fetcher,
//   LinkExtractor and PageStore
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use super::frontier::{FrontierQueue, VisitedSet, WorkItem};
use super::normalize::{is_absolute_with_host, is_crawlable, normalize};
use super::report::{CrawlReport, CrawlResult, Outcome, Reporter};
use crate::error::CrawlError;
use crate::store::PageStore;
use crate::web::{Fetcher, LinkExtractor};

// Keeps one link-farm page from flooding the frontier
pub const DEFAULT_MAX_LINKS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlBudget {
    /// Deepest level that is still fetched (links found there are not followed)
    pub max_depth: usize,
    /// Most pages saved in one run, at least 1
    pub max_pages: usize,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub budget: CrawlBudget,
    pub max_links_per_page: usize,
    pub workers: usize,
    /// Print a progress line for every page
    pub echo_progress: bool,
}

impl CrawlConfig {
    pub fn new(max_depth: usize, max_pages: usize) -> Self {
        Self {
            budget: CrawlBudget {
                max_depth,
                max_pages,
            },
            max_links_per_page: DEFAULT_MAX_LINKS_PER_PAGE,
            workers: 1,
            echo_progress: false,
        }
    }
}

pub struct Crawler<F, L, S> {
    fetcher: F,
    extractor: L,
    store: S,
    config: CrawlConfig,
}

// Everything one run owns. Built fresh in `run`, dropped when it returns.
struct CrawlState {
    frontier: FrontierQueue,
    visited: VisitedSet,
    in_flight: HashSet<String>,
    reporter: Reporter,
}

// A finished download: the item, its parsed URL, and (content, saved path)
struct Download {
    item: WorkItem,
    url: Url,
    result: Result<(String, PathBuf), CrawlError>,
}

impl<F, L, S> Crawler<F, L, S>
where
    F: Fetcher,
    L: LinkExtractor,
    S: PageStore,
{
    pub fn new(fetcher: F, extractor: L, store: S, mut config: CrawlConfig) -> Self {
        config.workers = config.workers.max(1);
        config.budget.max_pages = config.budget.max_pages.max(1);
        Self {
            fetcher,
            extractor,
            store,
            config,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub async fn run(&self, start_url: &str) -> Result<CrawlReport, CrawlError> {
        // Pre-flight: if we can't write anywhere there's no point fetching
        self.store.prepare().await?;

        let mut state = CrawlState {
            frontier: FrontierQueue::new(),
            visited: VisitedSet::new(),
            in_flight: HashSet::new(),
            reporter: Reporter::new(self.config.echo_progress),
        };
        state.frontier.push(WorkItem::new(start_url, 0));

        info!(
            seed = start_url,
            max_depth = self.config.budget.max_depth,
            max_pages = self.config.budget.max_pages,
            workers = self.config.workers,
            "crawl started"
        );

        let mut downloads = FuturesUnordered::new();
        loop {
            while downloads.len() < self.config.workers {
                match self.claim_next(&mut state) {
                    Some((item, url)) => downloads.push(self.download(item, url)),
                    None => break,
                }
            }

            // Nothing in flight and nothing claimable: frontier empty or budget met
            let Some(download) = downloads.next().await else {
                break;
            };
            self.complete(&mut state, download);
        }

        let frontier_left = state.frontier.len();
        let report = state.reporter.finish(start_url);
        info!(
            frontier_left,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "crawl finished"
        );
        Ok(report)
    }

    // Pops frontier items until one may be fetched, and claims it.
    // Returns None when the frontier is empty or the budget is used up.
    fn claim_next(&self, state: &mut CrawlState) -> Option<(WorkItem, Url)> {
        let budget = self.config.budget;
        loop {
            if state.visited.len() + state.in_flight.len() >= budget.max_pages {
                return None;
            }
            let item = state.frontier.pop()?;

            let url = match Url::parse(&item.url) {
                Ok(url) if is_absolute_with_host(&url) => url,
                _ => {
                    let skipped = CrawlError::MalformedUrl(item.url);
                    debug!(error = %skipped, "skipping frontier item");
                    continue;
                }
            };
            let key = url.as_str();

            if state.visited.contains(key) || state.in_flight.contains(key) {
                debug!(url = key, "skipping already visited URL");
                continue;
            }
            if item.depth > budget.max_depth {
                debug!(url = key, depth = item.depth, "skipping URL past max depth");
                continue;
            }

            state.in_flight.insert(key.to_string());
            return Some((item, url));
        }
    }

    async fn download(&self, item: WorkItem, url: Url) -> Download {
        let result = match self.fetcher.fetch(&url).await {
            Ok(content) => match self.store.save(&url, &content).await {
                Ok(path) => Ok((content, path)),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        Download { item, url, result }
    }

    fn complete(&self, state: &mut CrawlState, download: Download) {
        let Download { item, url, result } = download;
        let key = url.as_str();
        state.in_flight.remove(key);

        let (content, saved_path) = match result {
            Ok(done) => done,
            Err(e) => {
                warn!(url = key, error = %e, "page failed");
                let outcome = match e {
                    CrawlError::Storage { .. } => Outcome::StorageError {
                        message: e.to_string(),
                    },
                    _ => Outcome::FetchError {
                        message: e.to_string(),
                    },
                };
                state.reporter.record(CrawlResult {
                    url: key.to_string(),
                    depth: item.depth,
                    outcome,
                });
                return;
            }
        };

        state.visited.add(key);
        info!(url = key, depth = item.depth, path = %saved_path.display(), "page saved");

        // Pages at max depth are saved but their links are not followed
        if item.depth >= self.config.budget.max_depth {
            state.reporter.record(CrawlResult {
                url: key.to_string(),
                depth: item.depth,
                outcome: Outcome::Success {
                    saved_path,
                    links_queued: 0,
                },
            });
            return;
        }

        let outcome = match self.extractor.extract_hrefs(&content) {
            Ok(hrefs) => {
                let links = self.accept_links(&hrefs, &url, &state.visited);
                let links_queued = links.len();
                for link in links {
                    state.frontier.push(WorkItem::new(link, item.depth + 1));
                }
                debug!(url = key, found = hrefs.len(), queued = links_queued, "links extracted");
                Outcome::Success {
                    saved_path,
                    links_queued,
                }
            }
            Err(e) => {
                warn!(url = key, error = %e, "could not extract links");
                Outcome::ParseError {
                    saved_path,
                    message: e.to_string(),
                }
            }
        };

        state.reporter.record(CrawlResult {
            url: key.to_string(),
            depth: item.depth,
            outcome,
        });
    }

    // Normalizes the hrefs of one page and keeps the ones worth queueing:
    // http(s) only, not visited yet, no repeats, at most max_links_per_page
    fn accept_links(&self, hrefs: &[String], page: &Url, visited: &VisitedSet) -> Vec<String> {
        let mut seen = HashSet::new();
        hrefs
            .iter()
            .filter_map(|href| normalize(href, page.as_str()))
            .filter(is_crawlable)
            .map(String::from)
            .filter(|link| !visited.contains(link))
            .filter(|link| seen.insert(link.clone()))
            .take(self.config.max_links_per_page)
            .collect()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why an explicit queue instead of recursion?
//    - Depth is a plain number on each WorkItem, easy to check and log
//    - No risk of blowing the stack on deep link chains
//    - FIFO order means we finish depth 1 before starting depth 2
//
// 2. Why does a failed fetch not mark the URL visited?
//    - A transient error (timeout, 503) shouldn't ban the page for the run
//    - If another page links to it, it gets another chance
//    - The page budget only counts saved pages, so retries can't overrun it
//
// 3. What is `let ... else`?
//    - `let Some(x) = expr else { break; };` binds x or runs the else block
//    - The else block must diverge (break, continue, return)
// -----------------------------------------------------------------------------

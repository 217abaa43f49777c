// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build the HTTP fetcher, link extractor and page store
// 4. Run the crawl and print the report
// 5. Exit with proper code (0 = all pages saved, 1 = some pages failed,
//    2 = the crawl could not start)
//
// Rust concepts used:
// - async/await: Because every page download is network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl loop and its data structures
mod error; // src/error.rs - typed crawl errors
mod logging; // src/logging.rs - tracing setup
mod store; // src/store.rs - saving pages to disk
mod web; // src/web/ - downloading pages and reading their links

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawl::{CrawlReport, CrawlResult, Crawler, Outcome};
use store::FsPageStore;
use web::{HtmlLinkExtractor, HttpFetcher};

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    // Bad arguments make clap print usage and exit on its own
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Pre-flight failure: nothing was crawled
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every attempted page was saved
//   Ok(1) = the crawl finished but some pages failed
//   Err   = the crawl could not start (logging, HTTP client, output dir)
async fn run(cli: Cli) -> Result<i32> {
    logging::init_logging(cli.verbose)?;

    let fetcher = HttpFetcher::new(&cli.user_agent, cli.request_timeout())?;
    let store = FsPageStore::new(&cli.output);
    let crawler = Crawler::new(fetcher, HtmlLinkExtractor::new(), store, cli.crawl_config());

    if !cli.json {
        let budget = crawler.config().budget;
        println!("🔍 Crawling: {}", cli.url);
        println!(
            "📊 Max depth: {}, max pages: {}",
            budget.max_depth, budget.max_pages
        );
        println!("📁 Saving to: {}", cli.output.display());
    }

    let report = crawler
        .run(&cli.url)
        .await
        .with_context(|| format!("cannot prepare output directory {}", cli.output.display()))?;

    print_report(&report, cli.json)?;

    if report.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the report either as a table or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints the report as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!();
    println!("{:<60} {:<6} {:<12} {:<30}", "URL", "DEPTH", "STATUS", "DETAIL");
    println!("{}", "=".repeat(110));

    for result in &report.results {
        // Truncate URL if too long for display
        let url_display = if result.url.chars().count() > 57 {
            format!("{}...", result.url.chars().take(57).collect::<String>())
        } else {
            result.url.clone()
        };

        println!(
            "{:<60} {:<6} {:<12} {:<30}",
            url_display,
            result.depth,
            format_status(result),
            format_detail(result)
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Saved: {}", report.succeeded);
    println!("   ❌ Failed: {}", report.failed);
    println!("   📋 Attempted: {}", report.attempted);
    println!("   ⏱️  Elapsed: {} ms", report.elapsed_ms);

    if report.has_failures() {
        println!();
        println!("Failed pages:");
        for failure in report.failures() {
            println!("   {} ({})", failure.url, format_detail(failure));
        }
    }
    println!("Crawl finished. Pages saved: {}", report.succeeded);
}

fn format_status(result: &CrawlResult) -> &'static str {
    match result.outcome {
        Outcome::Success { .. } => "✅ SAVED",
        Outcome::ParseError { .. } => "⚠️  NO LINKS",
        Outcome::FetchError { .. } => "❌ FETCH",
        Outcome::StorageError { .. } => "💾 STORAGE",
    }
}

fn format_detail(result: &CrawlResult) -> String {
    match &result.outcome {
        Outcome::Success {
            saved_path,
            links_queued,
        } => format!("{} (+{} links)", saved_path.display(), links_queued),
        Outcome::ParseError { message, .. }
        | Outcome::FetchError { message }
        | Outcome::StorageError { message } => message.clone(),
    }
}

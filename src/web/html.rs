// src/web/html.rs
// =============================================================================
// Extracts raw href values from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the way a
//   browser does, so a messy page still yields whatever anchors it has
//
// Unlike a link checker we don't resolve or filter anything here: the crawl
// controller needs the hrefs exactly as written so the normalizer can apply
// its own rules.
// =============================================================================

use scraper::{Html, Selector};

use super::LinkExtractor;
use crate::error::CrawlError;

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    // Example:
    //   html = "<a href='/docs'>Docs</a><a>no href</a><a href='x.html'>X</a>"
    //   result = ["/docs", "x.html"]
    fn extract_hrefs(&self, html: &str) -> Result<Vec<String>, CrawlError> {
        // "a[href]" means "all <a> tags that have an href attribute"
        let selector =
            Selector::parse("a[href]").map_err(|e| CrawlError::Parse(e.to_string()))?;

        let document = Html::parse_document(html);

        let hrefs = document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Ok(hrefs)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why return Result if scraper never fails?
//    - The selector itself is parsed at runtime and can fail
//    - Other extractors (and the test fakes) can fail for real
//    - The controller treats an Err as "page saved, zero links"
//
// 2. What does .value() do?
//    - element is an ElementRef (reference into the DOM tree)
//    - .value() gets the underlying Element
//    - .attr("href") gets the attribute value, if any
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(html: &str) -> Vec<String> {
        HtmlLinkExtractor::new().extract_hrefs(html).unwrap()
    }

    #[test]
    fn test_hrefs_in_document_order() {
        let html = r#"
            <a href="https://www.rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        assert_eq!(hrefs(html), vec!["https://www.rust-lang.org", "/docs", "../about"]);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="top">Top</a><a href="x.html">X</a>"#;
        assert_eq!(hrefs(html), vec!["x.html"]);
    }

    #[test]
    fn test_hrefs_are_not_filtered() {
        let html = r#"<a href="mailto:test@example.com">Email</a><a href="">Empty</a>"#;
        assert_eq!(hrefs(html), vec!["mailto:test@example.com", ""]);
    }

    #[test]
    fn test_broken_markup_still_yields_links() {
        let html = r#"<div><p><a href="/one">one</p><a href="/two">two"#;
        assert_eq!(hrefs(html), vec!["/one", "/two"]);
    }

    #[test]
    fn test_no_anchors() {
        assert!(hrefs("plain text, not html").is_empty());
    }
}

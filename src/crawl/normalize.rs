// src/crawl/normalize.rs
// =============================================================================
// Turns a raw href (whatever was inside <a href="...">) into an absolute URL.
//
// Rules, in order:
// 1. empty / whitespace-only      -> unusable
// 2. protocol-relative "//host/x" -> "https://host/x"
// 3. root-relative "/x"           -> scheme + host (+ port) of the base, then "/x"
// 4. already absolute "scheme:..."-> parsed and returned in canonical form
// 5. anything else                -> resolved against the base ("../x", "a.html")
//
// Unusable is `None`. Nothing in here panics or returns an error: a bad base
// or a bad href just means "don't follow this link".
//
// Note that rule 4 accepts any scheme (mailto:, ftp:, ...). Deciding which
// schemes are crawlable is the controller's job, see `is_crawlable`.
// =============================================================================

use url::Url;

pub fn normalize(href: &str, base_url: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("//") {
        return Url::parse(&format!("https:{}", href)).ok().filter(has_host);
    }

    if href.starts_with('/') {
        let base = Url::parse(base_url).ok().filter(has_host)?;
        let host = base.host_str()?;
        let origin = match base.port() {
            Some(port) => format!("{}://{}:{}", base.scheme(), host, port),
            None => format!("{}://{}", base.scheme(), host),
        };
        return Url::parse(&format!("{}{}", origin, href)).ok();
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        // No scheme: it's relative to the page it came from
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(base_url).ok()?;
            base.join(href).ok()
        }
        Err(_) => None,
    }
}

// Only http and https pages are fetched
pub fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// Well-formed absolute URL: has a scheme (guaranteed by Url) and a host
pub fn is_absolute_with_host(url: &Url) -> bool {
    has_host(url) && !url.cannot_be_a_base()
}

fn has_host(url: &Url) -> bool {
    url.host_str().map_or(false, |host| !host.is_empty())
}

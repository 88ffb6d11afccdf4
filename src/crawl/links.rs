// src/crawl/links.rs
// =============================================================================
// Extracts crawlable links from an HTML page.
//
// We use the `scraper` crate to find every <a href="..."> and the `url`
// crate to resolve each href against the page it was found on (not the
// seed), so "../other" on /docs/intro/ lands on /docs/other.
//
// Host scoping and deduplication happen later, in CrawlContext.
//
// Rust concepts:
// - Iterator chains: select() -> filter_map() -> collect() with no
//   intermediate Vec
// - Option + ?: resolve_link() bails out with None at the first failure
// - let-else: return early when the selector can't be built
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all http(s) links from `html`, resolved against `page_url`
//
// Returns absolute URLs with the fragment removed. Hrefs that can't be
// resolved (malformed) or use another scheme (mailto:, tel:, javascript:,
// ftp:) are dropped silently.
pub fn extract_links(html: &str, page_url: &str) -> Vec<Url> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(&base, href))
        .collect()
}

// Resolves a (possibly relative) href against the page URL
//
// Examples with base = "https://example.com/docs/intro/":
//   "/about"           -> https://example.com/about
//   "../other"         -> https://example.com/docs/other
//   "setup#install"    -> https://example.com/docs/intro/setup
//   "mailto:a@b.c"     -> None
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

// src/crawl/queue.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Dequeue the next URL and mark it visited (before fetching, so it
//    counts against the page budget whatever happens)
// 3. Fetch the page; if it's HTML, extract its links
// 4. Add same-host links to the tail of the frontier (if never seen before)
// 5. Repeat until the frontier is empty or the page budget is spent
//
// Failure isolation:
// - A page that times out or can't be reached is recorded as an error and
//   the crawl moves on; nothing is retried
// - Non-2xx and non-HTML responses are skipped without an error
//
// The loop is sequential: one fetch at a time, each fully awaited.
//
// Rust concepts:
// - while let: keep looping while next_url() returns Some(url)
// - match on a Result<enum, error>: every fetch ending handled in one place
// - tracing fields: `url = %url` logs with Display, `?value` with Debug
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::context::{CrawlContext, CrawlResult, PageOutcome};
use super::fetch::{describe_error, fetch_page, FetchOutcome};
use super::links::extract_links;
use crate::config::CrawlConfig;

// A reusable crawler
//
// Holds the HTTP client (connection pool, user agent, timeout) and the
// settings. Crawl state lives in a fresh CrawlContext per call to crawl(),
// so one Crawler can serve many concurrent crawls.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    // Crawls every same-host page reachable from `seed`
    //
    // Never fails: per-page problems end up in CrawlResult::errors.
    // The seed must be an absolute http(s) URL with a host (see
    // api::normalize_seed_url).
    pub async fn crawl(&self, seed: &Url) -> CrawlResult {
        let mut context = CrawlContext::new(seed, self.config.max_pages);

        info!(
            seed = %seed,
            host = context.host(),
            max_pages = self.config.max_pages,
            "Starting crawl"
        );

        while let Some(url) = context.next_url() {
            debug!(
                url = %url,
                visited = context.visited_count(),
                frontier = context.frontier_len(),
                "Fetching page"
            );

            let outcome = match fetch_page(&self.client, &url).await {
                Ok(FetchOutcome::Html(html)) => {
                    let links = extract_links(&html, &url);
                    let new_links = context.enqueue_links(links);
                    PageOutcome::Fetched { new_links }
                }
                Ok(FetchOutcome::NonSuccess(status)) => {
                    debug!(url = %url, status = status.as_u16(), "Skipping non-success response");
                    PageOutcome::SkippedNonSuccess {
                        status: status.as_u16(),
                    }
                }
                Ok(FetchOutcome::NonHtml(content_type)) => {
                    debug!(url = %url, content_type = ?content_type, "Skipping non-HTML response");
                    PageOutcome::SkippedNonHtml { content_type }
                }
                Err(e) => {
                    let reason = describe_error(&e);
                    warn!(url = %url, error = %reason, "Failed to fetch page");
                    PageOutcome::Failed { reason }
                }
            };

            context.record(url, outcome);
        }

        let result = context.finish();
        info!(
            seed = %seed,
            pages = result.len(),
            errors = result.errors.len(),
            "Crawl finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Mock, Server, ServerGuard};

    fn crawler(max_pages: usize) -> Crawler {
        Crawler::new(CrawlConfig::new(max_pages, 5)).unwrap()
    }

    async fn html_page(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .create_async()
            .await
    }

    fn paths(result: &CrawlResult, base: &str) -> Vec<String> {
        result
            .urls()
            .map(|u| u.strip_prefix(base).unwrap_or(u).to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_breadth_first_same_host_crawl() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = html_page(
            &mut server,
            "/",
            r#"<a href="/a">A</a><a href="b">B</a><a href="https://other.com/x">Other</a>"#,
        )
        .await;
        let _a = html_page(&mut server, "/a", r#"<a href="/a/deep">Deep</a>"#).await;
        let _b = html_page(&mut server, "/b", r#"<a href="/">Home</a><a href="/a#top">A</a>"#).await;
        let _deep = html_page(&mut server, "/a/deep", "<p>No links</p>").await;

        let seed = Url::parse(&base).unwrap();
        let result = crawler(100).crawl(&seed).await;

        assert_eq!(paths(&result, &base), vec!["/", "/a", "/b", "/a/deep"]);
        assert!(result.errors.is_empty());
        assert!(result.urls().all(|u| Url::parse(u).unwrap().host_str() == seed.host_str()));
    }

    #[tokio::test]
    async fn test_each_page_is_fetched_once() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let root = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/loop">Loop</a><a href="/loop">Again</a>"#)
            .expect(1)
            .create_async()
            .await;
        let looped = server
            .mock("GET", "/loop")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/">Home</a><a href="/loop#self">Self</a>"#)
            .expect(1)
            .create_async()
            .await;

        let result = crawler(100).crawl(&Url::parse(&base).unwrap()).await;

        assert_eq!(result.len(), 2);
        root.assert_async().await;
        looped.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_and_non_html_are_skipped_silently() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _root = html_page(
            &mut server,
            "/",
            r#"<a href="/missing">Gone</a><a href="/report.pdf">PDF</a>"#,
        )
        .await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .with_body("<a href=\"/never\">never followed</a>")
            .create_async()
            .await;
        let _pdf = server
            .mock("GET", "/report.pdf")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF")
            .create_async()
            .await;

        let result = crawler(100).crawl(&Url::parse(&base).unwrap()).await;

        assert!(result.errors.is_empty());
        assert_eq!(paths(&result, &base), vec!["/", "/missing", "/report.pdf"]);
        assert_eq!(
            result.visits[1].outcome,
            PageOutcome::SkippedNonSuccess { status: 404 }
        );
        assert_eq!(
            result.visits[2].outcome,
            PageOutcome::SkippedNonHtml {
                content_type: Some("application/pdf".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_recorded_and_crawl_continues() {
        let mut server = Server::new_async().await;
        let base = server.url();

        // Same host (127.0.0.1), but nothing listens on port 1
        let _root = html_page(
            &mut server,
            "/",
            r#"<a href="http://127.0.0.1:1/dead">Dead</a><a href="/ok">Ok</a>"#,
        )
        .await;
        let _ok = html_page(&mut server, "/ok", "<p>fine</p>").await;

        let result = crawler(100).crawl(&Url::parse(&base).unwrap()).await;

        assert_eq!(result.len(), 3);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Error crawling http://127.0.0.1:1/dead: "));
        assert!(result.visits[1].outcome.is_failure());
        assert_eq!(result.visits[2].outcome, PageOutcome::Fetched { new_links: 0 });
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_as_error() {
        // Accepts connections and never answers them
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let crawler = Crawler::new(CrawlConfig::new(5, 1)).unwrap();
        let seed = Url::parse(&format!("http://{}/", addr)).unwrap();
        let result = crawler.crawl(&seed).await;

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.visits[0].outcome,
            PageOutcome::Failed {
                reason: "request timed out".to_string()
            }
        );
        assert_eq!(
            result.errors,
            vec![format!("Error crawling http://{}/: request timed out", addr)]
        );
    }

    #[tokio::test]
    async fn test_budget_limits_pages_attempted() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let links: String = (0..10)
            .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
            .collect();
        let _root = html_page(&mut server, "/", &links).await;
        let _pages = server
            .mock("GET", mockito::Matcher::Regex(r"^/p\d$".to_string()))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>leaf</p>")
            .create_async()
            .await;

        let result = crawler(3).crawl(&Url::parse(&base).unwrap()).await;

        assert_eq!(paths(&result, &base), vec!["/", "/p0", "/p1"]);
    }

    #[tokio::test]
    async fn test_zero_budget_fetches_nothing() {
        let mut server = Server::new_async().await;
        let root = server
            .mock("GET", "/")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let result = crawler(0).crawl(&Url::parse(&server.url()).unwrap()).await;

        assert!(result.is_empty());
        assert!(result.errors.is_empty());
        root.assert_async().await;
    }
}

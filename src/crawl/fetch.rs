// src/crawl/fetch.rs
// =============================================================================
// Fetches a single page for the crawler.
//
// A fetch has four possible endings:
// - HTML body downloaded            -> FetchOutcome::Html
// - non-2xx status                  -> FetchOutcome::NonSuccess
// - 2xx but not text/html           -> FetchOutcome::NonHtml
// - network error / timeout         -> Err(reqwest::Error)
//
// Redirects are followed by reqwest (default policy, up to 10 hops).
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

#[derive(Debug)]
pub enum FetchOutcome {
    Html(String),
    NonSuccess(StatusCode),
    NonHtml(Option<String>),
}

// Issues a GET for `url` and classifies the response
//
// The client carries the user agent and per-request timeout.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchOutcome, reqwest::Error> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Ok(FetchOutcome::NonSuccess(status));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if !is_html(content_type.as_deref()) {
        return Ok(FetchOutcome::NonHtml(content_type));
    }

    let html = response.text().await?;
    Ok(FetchOutcome::Html(html))
}

// "text/html; charset=utf-8" counts, a missing header doesn't
fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("text/html"))
}

// Turns a reqwest error into a short human-readable reason
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure / connection refused
// - Too many redirects
// - Body decode failures
pub fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else {
        error.to_string()
    }
}

// src/api/mod.rs
// =============================================================================
// The request/response contract callers (the web form, the CLI) use to
// get a sitemap: validate input -> crawl -> sort -> render.
//
// Errors come in two kinds:
// - Validation errors: bad input, rejected before any crawling starts
// - Internal errors: something went wrong inside (e.g. a panic in the crawl
//   task). The cause is logged, the caller only sees a generic message.
//
// Per-page crawl failures are not errors here: they travel inside the
// preview payload.
//
// Seed URLs are stored the way the url crate serializes them, so a bare
// host always gets a trailing slash: "example.com" is crawled and listed in
// the sitemap as "https://example.com/". A link to "/" on that site is then
// the same page as the seed, not a second entry.
//
// Rust concepts:
// - thiserror: derive Display/Error for an enum of failure cases
// - serde_json::Value: accept loosely typed JSON and check it ourselves
// - tokio::spawn: a panic in a spawned task comes back as a JoinError
//
// Submodules:
// - server: axum routes exposing this contract over HTTP
// =============================================================================

pub mod server;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::crawl::{CrawlResult, Crawler};
use crate::sitemap::{self, Format};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Invalid format")]
    InvalidFormat,

    #[error("Request body must be a JSON object")]
    InvalidBody,

    #[error("Failed to generate sitemap")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        !matches!(self, ApiError::Internal(_))
    }
}

// Raw request as it arrives over the wire
//
// Fields are loosely typed on purpose: `{"url": 42}` must become
// ApiError::MissingUrl, not a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub download: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub seed: Url,
    pub download: Option<Format>,
}

// Every format rendered from the same sorted URL list
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFormats {
    pub xml: String,
    pub txt: String,
    pub csv: String,
}

// Preview payload: lets a caller switch formats without crawling again
#[derive(Debug, Clone, Serialize)]
pub struct SitemapPreview {
    pub urls: Vec<String>,
    pub count: usize,
    pub formats: RenderedFormats,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum GenerateResponse {
    /// A single rendered file
    Download { format: Format, content: String },
    Preview(SitemapPreview),
}

// Normalizes user input into a seed URL
//
// - Surrounding whitespace is trimmed
// - "https://" is prepended unless the input starts with http:// or https://
// - The result must parse as an absolute URL with a host
// - Any fragment is dropped (it never identifies a different page)
//
// Example: "  example.com " -> https://example.com/
pub fn normalize_seed_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&candidate).map_err(|_| ApiError::InvalidUrl)?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ApiError::InvalidUrl);
    }

    url.set_fragment(None);
    Ok(url)
}

// Checks a raw request and turns it into a seed URL plus optional download format
pub fn validate(request: &GenerateRequest) -> Result<ValidatedRequest, ApiError> {
    let raw_url = match &request.url {
        Some(Value::String(url)) if !url.is_empty() => url,
        _ => return Err(ApiError::MissingUrl),
    };

    let seed = normalize_seed_url(raw_url)?;

    let download = match &request.download {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => {
            Some(name.parse::<Format>().map_err(|_| ApiError::InvalidFormat)?)
        }
        Some(_) => return Err(ApiError::InvalidFormat),
    };

    Ok(ValidatedRequest { seed, download })
}

// Sorts the crawled URLs once, then renders what was asked for
//
// Sorting before choosing the format keeps every format in the same order.
pub fn build_response(result: CrawlResult, download: Option<Format>) -> GenerateResponse {
    let urls = result.sorted_urls();

    match download {
        Some(format) => GenerateResponse::Download {
            format,
            content: sitemap::render(format, &urls),
        },
        None => GenerateResponse::Preview(SitemapPreview {
            count: urls.len(),
            formats: RenderedFormats {
                xml: sitemap::render_xml(&urls),
                txt: sitemap::render_txt(&urls),
                csv: sitemap::render_csv(&urls),
            },
            urls,
            errors: result.errors,
        }),
    }
}

pub async fn generate(crawler: &Crawler, request: ValidatedRequest) -> GenerateResponse {
    let result = crawler.crawl(&request.seed).await;
    build_response(result, request.download)
}

// Full request handling: validate, then crawl and render on a separate task
//
// Running the work on its own task means a panic anywhere in crawling or
// rendering comes back as a JoinError instead of taking the caller down.
pub async fn handle_generate(
    crawler: Arc<Crawler>,
    request: GenerateRequest,
) -> Result<GenerateResponse, ApiError> {
    let validated = validate(&request)?;

    tracing::info!(
        seed = %validated.seed,
        download = ?validated.download,
        "Generating sitemap"
    );

    run_isolated(async move { generate(&crawler, validated).await }).await
}

// Runs `work` on its own tokio task
//
// A panic inside `work` is caught by the runtime and surfaces as a JoinError,
// which becomes ApiError::Internal (an opaque 500 for HTTP callers).
pub async fn run_isolated<F, T>(work: F) -> Result<T, ApiError>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("sitemap task failed")))
}

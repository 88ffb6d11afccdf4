// src/config.rs
// =============================================================================
// Runtime settings for crawling and serving.
//
// There is no config file: every value has a default here and can be
// overridden from the command line (see cli.rs).
// =============================================================================

use std::net::SocketAddr;
use std::time::Duration;

// Maximum number of pages a single crawl will attempt
pub const DEFAULT_MAX_PAGES: usize = 100;

// Per-request timeout for every page fetch
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Client identifier sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SitemapGenerator/1.0)";

// Settings for one crawl
//
// Cloned into the Crawler; nothing here changes while a crawl runs.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Page budget: once this many URLs have been attempted, the crawl stops
    pub max_pages: usize,
    /// Timeout applied to each GET (there is no overall crawl timeout)
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn new(max_pages: usize, timeout_secs: u64) -> Self {
        Self {
            max_pages,
            request_timeout: Duration::from_secs(timeout_secs),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

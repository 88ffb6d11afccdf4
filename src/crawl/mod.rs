// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-host restriction (doesn't crawl external sites)
// - Page budget (default 100 attempted pages)
// - Per-page failure isolation: one bad page never aborts the crawl
//
// Submodules:
// - context: frontier / visited-set bookkeeping for one crawl (no I/O)
// - fetch: a single GET and how its response is classified
// - links: <a href> extraction and resolution
// - queue: the crawl loop tying the three together
// =============================================================================

mod context;
mod fetch;
mod links;
mod queue;

pub use context::{CrawlResult, PageOutcome, PageVisit};
pub use queue::Crawler;

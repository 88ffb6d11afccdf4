// src/crawl/context.rs
// =============================================================================
// The state owned by one crawl: frontier, visited set, outcomes and errors.
//
// Every crawl builds its own CrawlContext and consumes it with finish(), so
// two crawls running at the same time never share anything.
//
// Invariants kept here (and nowhere else):
// - The frontier is FIFO, so pages are visited breadth-first
// - A URL is never in the frontier twice, and never re-enters it once visited
// - A URL is marked visited when it is dequeued, before it is fetched,
//   so a failing page still spends one unit of the budget
// - Only URLs on the seed's host are ever enqueued
// - |visited| never exceeds the page budget
//
// Rust concepts:
// - VecDeque: push_back() to enqueue, pop_front() to dequeue (FIFO = BFS)
// - HashSet::insert returns false when the value was already there, which
//   gives "check and mark" in one call
// - finish(self) takes ownership, so a finished context can't be reused
// =============================================================================

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use url::Url;

// What happened when we tried to fetch one URL
//
// Only `Failed` produces an error record. Non-2xx statuses and non-HTML
// bodies are normal when following links (images, PDFs, dead links) and are
// skipped quietly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// HTML page fetched and parsed; `new_links` is how many URLs it added to the frontier
    Fetched { new_links: usize },
    /// Server answered with a non-2xx status
    SkippedNonSuccess { status: u16 },
    /// Server answered 2xx but the body isn't text/html
    SkippedNonHtml { content_type: Option<String> },
    /// Network error, timeout, or the body couldn't be read
    Failed { reason: String },
}

impl PageOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PageOutcome::Failed { .. })
    }
}

// One attempted URL and how it went
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVisit {
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

// The final output of a crawl
//
// `visits` is in attempt order (the seed first); use sorted_urls() for
// presentation. `errors` is in the order the failures happened.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlResult {
    pub visits: Vec<PageVisit>,
    pub errors: Vec<String>,
}

impl CrawlResult {
    /// Visited URLs in the order they were attempted
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.visits.iter().map(|visit| visit.url.as_str())
    }

    /// Visited URLs in ascending code-point order (the order every sitemap format uses)
    pub fn sorted_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls().map(str::to_string).collect();
        urls.sort();
        urls
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[derive(Debug)]
pub struct CrawlContext {
    host: String,
    budget: usize,
    frontier: VecDeque<String>,
    visited: HashSet<String>,
    // Everything ever enqueued: frontier ∪ visited
    seen: HashSet<String>,
    visits: Vec<PageVisit>,
    errors: Vec<String>,
}

impl CrawlContext {
    /// Starts a crawl at `seed` with room for `budget` page attempts.
    ///
    /// A budget of 0 gives an empty frontier: the crawl is a no-op.
    pub fn new(seed: &Url, budget: usize) -> Self {
        let mut context = Self {
            host: seed.host_str().unwrap_or_default().to_string(),
            budget,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            seen: HashSet::new(),
            visits: Vec::new(),
            errors: Vec::new(),
        };

        let mut seed = seed.clone();
        seed.set_fragment(None);
        context.push(seed.to_string());

        context
    }

    /// Host every crawled URL must share with the seed
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    // Dequeues the next URL to fetch and marks it visited
    //
    // Returns None when the frontier is empty or the budget is spent.
    pub fn next_url(&mut self) -> Option<String> {
        while self.visited.len() < self.budget {
            let url = self.frontier.pop_front()?;

            // Can't happen with enqueue-time filtering, but a URL must never be
            // attempted twice
            if !self.visited.insert(url.clone()) {
                continue;
            }

            return Some(url);
        }

        None
    }

    /// Records how the attempt at `url` went.
    pub fn record(&mut self, url: String, outcome: PageOutcome) {
        if let PageOutcome::Failed { reason } = &outcome {
            self.errors.push(format!("Error crawling {}: {}", url, reason));
        }
        self.visits.push(PageVisit { url, outcome });
    }

    // Adds newly discovered links to the tail of the frontier
    //
    // Links must already be absolute; fragments are stripped here as well so
    // that "#a" and "#b" variants of one page collapse into one entry.
    // Returns how many were actually enqueued.
    pub fn enqueue_links<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        let mut added = 0;

        for mut link in links {
            if link.host_str() != Some(self.host.as_str()) {
                continue;
            }

            link.set_fragment(None);
            if self.push(link.into()) {
                added += 1;
            }
        }

        added
    }

    pub fn finish(self) -> CrawlResult {
        CrawlResult {
            visits: self.visits,
            errors: self.errors,
        }
    }

    // Only budget - |visited| more URLs can ever be dequeued, so anything
    // beyond |frontier| + |visited| == budget would just sit in memory.
    fn push(&mut self, url: String) -> bool {
        if self.frontier.len() + self.visited.len() >= self.budget {
            return false;
        }
        if !self.seen.insert(url.clone()) {
            return false;
        }

        self.frontier.push_back(url);
        true
    }
}

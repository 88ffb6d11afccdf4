// src/main.rs
// =============================================================================
// This is the entry point of the sitemap generator.
//
// What happens here:
// 1. Set up logging (tracing, to stderr so stdout stays clean for sitemaps)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts:
// - #[tokio::main]: turns async main into a real main with a runtime
// - anyhow::Result + ?: any error bubbles up to main() with its context
// - {:#}: prints an anyhow error together with its chain of causes
// =============================================================================

mod api;       // src/api/ - request validation, generate contract, HTTP server
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - crawl and server settings
mod crawl;     // src/crawl/ - breadth-first website crawling
mod sitemap;   // src/sitemap/ - XML / TXT / CSV rendering

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, CrawlArgs};
use config::ServerConfig;
use crawl::{CrawlResult, Crawler, PageOutcome, PageVisit};
use sitemap::Format;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sitemap_generator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            url,
            format,
            output,
            json,
            crawl,
        } => handle_generate(&url, format, output.as_deref(), json, &crawl).await,
        Commands::Serve { host, port, crawl } => {
            let config = ServerConfig {
                addr: SocketAddr::new(host, port),
            };
            let crawler = Crawler::new(crawl.to_config())?;
            api::server::serve(config, crawler).await
        }
    }
}

// Handles the 'generate' subcommand
//
// Output depends on the flags:
//   --format F [--output PATH]  the rendered sitemap, to stdout or a file
//   --json                      the preview payload the HTTP API returns
//   (neither)                   a table of every attempted URL and its outcome
async fn handle_generate(
    url: &str,
    format: Option<Format>,
    output: Option<&Path>,
    json: bool,
    crawl: &CrawlArgs,
) -> Result<()> {
    let seed = api::normalize_seed_url(url)?;
    let crawler = Crawler::new(crawl.to_config())?;

    let result = crawler.crawl(&seed).await;

    if let Some(format) = format {
        let content = sitemap::render(format, &result.sorted_urls());
        match output {
            Some(path) => {
                std::fs::write(path, &content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), pages = result.len(), "Sitemap written");
            }
            // print! rather than println!: the bytes on stdout are the file
            None => print!("{}", content),
        }
        return Ok(());
    }

    if json {
        let response = api::build_response(result, None);
        if let api::GenerateResponse::Preview(preview) = response {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        return Ok(());
    }

    print_table(&result);
    Ok(())
}

// Prints every attempted URL with its outcome, then a summary
fn print_table(result: &CrawlResult) {
    if result.is_empty() {
        println!("No pages crawled");
        return;
    }

    println!("{:<70} {:<25}", "URL", "OUTCOME");
    println!("{}", "=".repeat(95));

    for visit in &result.visits {
        println!("{:<70} {:<25}", url_display(visit), format_outcome(&visit.outcome));
    }

    println!();

    let fetched = result
        .visits
        .iter()
        .filter(|v| matches!(v.outcome, PageOutcome::Fetched { .. }))
        .count();
    let failed = result.visits.iter().filter(|v| v.outcome.is_failure()).count();

    println!("Summary:");
    println!("   Pages attempted: {}", result.len());
    println!("   HTML pages:      {}", fetched);
    println!("   Skipped:         {}", result.len() - fetched - failed);
    println!("   Failed:          {}", failed);

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &result.errors {
            println!("   {}", error);
        }
    }
}

// Truncates long URLs so the table stays aligned
fn url_display(visit: &PageVisit) -> String {
    if visit.url.chars().count() > 67 {
        format!("{}...", visit.url.chars().take(67).collect::<String>())
    } else {
        visit.url.clone()
    }
}

fn format_outcome(outcome: &PageOutcome) -> String {
    match outcome {
        PageOutcome::Fetched { new_links } => format!("OK (+{} links)", new_links),
        PageOutcome::SkippedNonSuccess { status } => format!("SKIPPED (HTTP {})", status),
        PageOutcome::SkippedNonHtml { content_type } => format!(
            "SKIPPED ({})",
            content_type.as_deref().unwrap_or("no content type")
        ),
        PageOutcome::Failed { .. } => "FAILED".to_string(),
    }
}

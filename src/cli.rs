// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - generate: crawl a site once and print (or save) its sitemap
// - serve:    run the HTTP API the web form talks to
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::{CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS};
use crate::sitemap::Format;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-generator",
    version = "0.1.0",
    about = "Crawl a website and export its pages as a sitemap",
    long_about = "sitemap-generator crawls every page reachable from a starting URL on the same host \
                  (breadth-first, up to a page budget) and renders the result as an XML sitemap, \
                  a plain-text URL list or a CSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and output its sitemap
    ///
    /// Example: sitemap-generator generate example.com --format xml --output sitemap.xml
    Generate {
        /// Website URL to crawl; https:// is assumed when no scheme is given
        url: String,

        /// Output a single sitemap format instead of a summary table
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Write the sitemap to this file instead of stdout (requires --format)
        #[arg(long, short, requires = "format")]
        output: Option<PathBuf>,

        /// Print the full preview (URLs, count, every format, errors) as JSON
        #[arg(long, conflicts_with = "format")]
        json: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Serve the sitemap API over HTTP
    ///
    /// Example: sitemap-generator serve --port 3000
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

// Crawl settings shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Maximum number of pages to attempt (0 crawls nothing)
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig::new(self.max_pages, self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["sitemap-generator", "generate", "example.com"]);
        let Commands::Generate { url, format, output, json, crawl } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(url, "example.com");
        assert_eq!(format, None);
        assert_eq!(output, None);
        assert!(!json);
        assert_eq!(crawl.max_pages, 100);
        assert_eq!(crawl.timeout_secs, 10);
    }

    #[test]
    fn test_generate_with_format() {
        let cli = Cli::parse_from([
            "sitemap-generator", "generate", "example.com",
            "--format", "csv", "-o", "out.csv", "--max-pages", "5",
        ]);
        let Commands::Generate { format, output, crawl, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(format, Some(Format::Csv));
        assert_eq!(output, Some(PathBuf::from("out.csv")));
        assert_eq!(crawl.to_config().max_pages, 5);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["sitemap-generator", "generate", "example.com", "--format", "pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_requires_format() {
        let result = Cli::try_parse_from(["sitemap-generator", "generate", "example.com", "-o", "x"]);
        assert!(result.is_err());
    }
}

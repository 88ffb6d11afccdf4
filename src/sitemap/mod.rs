// src/sitemap/mod.rs
// =============================================================================
// This module turns a list of crawled URLs into sitemap files.
//
// Submodules:
// - render: the three renderers (XML, plain text, CSV)
//
// The renderers are pure functions: same input, byte-identical output.
// Callers sort the URLs once before choosing a format, so every format
// lists the pages in the same order.
// =============================================================================

mod render;

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

pub use render::{render, render_csv, render_txt, render_xml};

// The output formats a sitemap can be exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// sitemaps.org XML (what search engines read)
    Xml,
    /// One URL per line
    Txt,
    /// Spreadsheet-friendly CSV with a fixed header
    Csv,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Xml, Format::Txt, Format::Csv];

    /// File extension, also used in the download filename.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Txt => "txt",
            Format::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Xml => "application/xml",
            Format::Txt => "text/plain",
            Format::Csv => "text/csv",
        }
    }

    /// `sitemap.xml`, `sitemap.txt` or `sitemap.csv`
    pub fn filename(self) -> String {
        format!("sitemap.{}", self.extension())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// Error returned when a format name isn't one we know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sitemap format '{0}' (expected xml, txt or csv)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    // Matching is exact: "XML" or " xml" are rejected, same as the HTTP API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.extension() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

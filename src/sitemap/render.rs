// src/sitemap/render.rs
// =============================================================================
// Renders a sorted list of URLs into sitemap text.
//
// The output is a compatibility surface (search engines and spreadsheets
// parse it), so the exact bytes matter:
// - changefreq is always "weekly" and priority always "0.5"
// - URLs are written as-is: no XML escaping, no CSV quote doubling.
//   URLs are expected to arrive percent-encoded from the url crate.
// =============================================================================

use super::Format;

const CHANGE_FREQUENCY: &str = "weekly";
const PRIORITY: &str = "0.5";
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const CSV_HEADER: &str = "URL,Last Modified,Change Frequency,Priority";

// Renders `urls` in the requested format
pub fn render<S: AsRef<str>>(format: Format, urls: &[S]) -> String {
    match format {
        Format::Xml => render_xml(urls),
        Format::Txt => render_txt(urls),
        Format::Csv => render_csv(urls),
    }
}

// Renders a sitemaps.org <urlset>
//
// Example for ["https://a.com"]:
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://a.com</loc>
//       <changefreq>weekly</changefreq>
//       <priority>0.5</priority>
//     </url>
//   </urlset>
pub fn render_xml<S: AsRef<str>>(urls: &[S]) -> String {
    let entries = urls
        .iter()
        .map(|url| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
                url.as_ref(),
                CHANGE_FREQUENCY,
                PRIORITY
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\">\n{}\n</urlset>",
        SITEMAP_NAMESPACE, entries
    )
}

// One URL per line, no trailing newline
pub fn render_txt<S: AsRef<str>>(urls: &[S]) -> String {
    urls.iter()
        .map(|url| url.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

// Header line, then one quoted row per URL
//
// The header is always followed by "\n", even when there are no rows.
pub fn render_csv<S: AsRef<str>>(urls: &[S]) -> String {
    let rows = urls
        .iter()
        .map(|url| format!("\"{}\",\"\",\"{}\",\"{}\"", url.as_ref(), CHANGE_FREQUENCY, PRIORITY))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", CSV_HEADER, rows)
}

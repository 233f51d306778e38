//! HTML extraction of the successor link and the table summary
//!
//! This module handles parsing page content to extract:
//! - The single "Next" link that continues the chain (same origin only)
//! - The sum of one numeric column of the page's first table

use crate::config::ExtractConfig;
use crate::url::{canonicalize, Origin};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// What a page contributes to the crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Canonical successor URL, if the page links onward within the origin
    pub next_url: Option<Url>,

    /// Sum of the tracked column, or `None` when the page has no table
    pub summary: Option<f64>,
}

/// Turns fetched page content into an [`Extraction`]
///
/// Extraction is deterministic and infallible: malformed content degrades to
/// a missing link or summary rather than an error.
pub trait PageExtractor: Send + Sync {
    fn extract(&self, body: &str, base_url: &Url) -> Extraction;
}

/// `PageExtractor` for HTML pages
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    origin: Origin,
    link_marker: String,
    summary_column: usize,
}

impl HtmlExtractor {
    /// Creates an extractor that only follows links within `origin`
    pub fn new(origin: Origin, config: &ExtractConfig) -> Self {
        Self {
            origin,
            link_marker: config.link_marker.clone(),
            summary_column: config.summary_column,
        }
    }
}

impl PageExtractor for HtmlExtractor {
    fn extract(&self, body: &str, base_url: &Url) -> Extraction {
        let document = Html::parse_document(body);

        let next_url = find_next_link(&document, base_url, &self.link_marker)
            .filter(|url| {
                let same_origin = self.origin.contains(url);
                if !same_origin {
                    tracing::debug!("Ignoring off-origin successor {}", url);
                }
                same_origin
            })
            .map(|url| canonicalize(&url));

        let summary = sum_table_column(&document, self.summary_column);

        tracing::trace!(
            "Extracted from {}: next={:?}, summary={:?}",
            base_url,
            next_url.as_ref().map(Url::as_str),
            summary
        );

        Extraction { next_url, summary }
    }
}

/// Finds the first `<a href>` whose visible text contains `marker`
///
/// Only the first matching anchor is considered; if its target cannot be
/// resolved the page has no successor.
fn find_next_link(document: &Html, base_url: &Url, marker: &str) -> Option<Url> {
    let selector = Selector::parse("a[href]").ok()?;

    let anchor = document
        .select(&selector)
        .find(|element| element.text().collect::<String>().contains(marker))?;

    anchor
        .value()
        .attr("href")
        .and_then(|href| resolve_link(href, base_url))
}

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None for empty hrefs, fragment-only links and the
/// `javascript:`, `mailto:`, `tel:` and `data:` schemes.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}

/// Sums `column` over the data rows of the document's first table
///
/// The first row is treated as a header. Rows where the column is missing
/// or does not parse as a number are skipped.
fn sum_table_column(document: &Html, column: usize) -> Option<f64> {
    let table_selector = Selector::parse("table").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    let table = document.select(&table_selector).next()?;

    let total: f64 = table
        .select(&row_selector)
        .skip(1)
        .filter_map(|row| cell_value(row, &cell_selector, column))
        .sum();

    Some(total)
}

fn cell_value(row: ElementRef<'_>, cell_selector: &Selector, column: usize) -> Option<f64> {
    let cell = row.select(cell_selector).nth(column)?;
    let text = cell.text().collect::<String>();
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::trace!("Skipping non-numeric cell {:?}", text.trim());
            None
        }
    }
}

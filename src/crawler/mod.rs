//! Crawler module for following page chains
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching (`PageFetcher`, `HttpFetcher`)
//! - Successor-link and table extraction (`PageExtractor`, `HtmlExtractor`)
//! - The concurrent scheduler and its worker pool
//! - The sequential baseline
//! - Run coordination and the worker-count scaling experiment

mod benchmark;
mod coordinator;
mod extractor;
mod fetcher;
mod pool;
mod scheduler;
mod sequential;
mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use benchmark::run_scaling_experiment;
pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{Extraction, HtmlExtractor, PageExtractor};
pub use fetcher::{build_http_client, fetch_url, FetchFailure, FetchResult, HttpFetcher, PageFetcher};
pub use pool::{PendingTask, TaskAbort, WorkerPool};
pub use scheduler::CrawlScheduler;
pub use sequential::SequentialCrawler;
pub use task::{crawl_page, TaskOutcome};

use url::Url;

/// A page whose fetch counted toward the budget
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub url: Url,

    /// Table summary of the page, if it had a table
    pub summary: Option<f64>,
}

/// Result of one crawl, independent of strategy
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlOutcome {
    /// Pages successfully fetched, as counted by the budget
    pub pages_crawled: usize,

    /// Pages observed by the crawl loop, in processing order
    pub pages: Vec<PageRecord>,
}

impl CrawlOutcome {
    /// Sum of all page summaries
    pub fn table_total(&self) -> f64 {
        self.pages.iter().filter_map(|page| page.summary).sum()
    }
}

//! Single-threaded reference crawler
//!
//! Walks an explicit FIFO frontier one page at a time. It exists to validate
//! the concurrent scheduler: both strategies must report the same page count
//! on the same chain.

use crate::crawler::extractor::PageExtractor;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::{CrawlOutcome, PageRecord};
use crate::url::canonicalize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use url::Url;

/// Baseline crawler with a plain frontier and visited set
pub struct SequentialCrawler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn PageExtractor>,
    max_pages: usize,
}

impl SequentialCrawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn PageExtractor>,
        max_pages: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            max_pages,
        }
    }

    /// Crawls from `seed` until the frontier empties or the budget is reached
    pub async fn run(&self, seed: Url) -> CrawlOutcome {
        tracing::info!(
            "Starting sequential crawl from {} (budget {})",
            seed,
            self.max_pages
        );

        let mut frontier = VecDeque::from([canonicalize(&seed)]);
        let mut visited: HashSet<Url> = HashSet::new();
        let mut pages = Vec::new();

        while pages.len() < self.max_pages {
            let Some(url) = frontier.pop_front() else {
                break;
            };

            if visited.contains(&url) {
                continue;
            }

            let result = self.fetcher.fetch(&url).await;
            visited.insert(url.clone());

            let body = match result {
                FetchResult::Success { body, .. } => body,
                FetchResult::Failure(reason) => {
                    tracing::warn!("Failed to fetch {}: {}", url, reason);
                    continue;
                }
            };

            let extraction = self.extractor.extract(&body, &url);
            tracing::debug!("Fetched {} ({}/{} pages)", url, pages.len() + 1, self.max_pages);

            if let Some(next) = extraction.next_url {
                if !visited.contains(&next) && !frontier.contains(&next) {
                    frontier.push_back(next);
                }
            }

            pages.push(PageRecord {
                url,
                summary: extraction.summary,
            });
        }

        tracing::info!("Sequential crawl finished: {} pages", pages.len());

        CrawlOutcome {
            pages_crawled: pages.len(),
            pages,
        }
    }
}

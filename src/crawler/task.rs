//! The fetch-and-extract unit of work executed by pool workers

use crate::crawler::extractor::{Extraction, PageExtractor};
use crate::crawler::fetcher::{FetchFailure, FetchResult, PageFetcher};
use crate::state::PageBudget;
use std::sync::Arc;
use url::Url;

/// Result of one fetch-and-extract task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The page was fetched and counted toward the budget
    Crawled { url: Url, extraction: Extraction },

    /// The fetch failed; the page is a dead end
    Failed { url: Url, reason: FetchFailure },

    /// The budget was exhausted before this page could count
    Stale { url: Url },
}

/// Fetches `url`, counts it against `budget`, and extracts its successor
///
/// The budget is charged here, at the moment the fetch succeeds, so a page
/// fetched before the budget ran out is always counted even if the scheduler
/// later discards its link. A success that finds the budget already full is
/// reported as [`TaskOutcome::Stale`] and its content is ignored.
pub async fn crawl_page(
    url: Url,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn PageExtractor>,
    budget: PageBudget,
) -> TaskOutcome {
    if budget.is_exhausted() {
        return TaskOutcome::Stale { url };
    }

    match fetcher.fetch(&url).await {
        FetchResult::Success { status, body } => {
            if !budget.try_record() {
                return TaskOutcome::Stale { url };
            }

            tracing::debug!(
                "Fetched {} (HTTP {}, {} bytes, {}/{} pages)",
                url,
                status,
                body.len(),
                budget.crawled(),
                budget.max()
            );

            let extraction = extractor.extract(&body, &url);
            TaskOutcome::Crawled { url, extraction }
        }
        FetchResult::Failure(reason) => TaskOutcome::Failed { url, reason },
    }
}

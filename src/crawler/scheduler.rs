//! Concurrent crawl scheduler
//!
//! This module drives a crawl across a fixed worker pool:
//! - Claims each URL in the visited set before it is submitted
//! - Keeps pending task handles in a FIFO and consumes them in submission order
//! - Stops when the page budget is reached or no task remains
//! - Abandons in-flight work at shutdown instead of draining it
//!
//! The driving loop is single-threaded: it is the only place that reads task
//! results and decides on new submissions. Its only blocking point is waiting
//! for the handle at the front of the queue.

use crate::crawler::extractor::PageExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pool::{PendingTask, WorkerPool};
use crate::crawler::task::{crawl_page, TaskOutcome};
use crate::crawler::{CrawlOutcome, PageRecord};
use crate::state::{PageBudget, VisitedSet};
use crate::url::canonicalize;
use crate::ConfigError;
use std::collections::VecDeque;
use std::sync::Arc;
use url::Url;

/// Scheduler for one concurrent crawl
///
/// Owns the worker pool, the visited set, the page budget and the queue of
/// pending tasks. A scheduler runs exactly one crawl; its state is discarded
/// when [`CrawlScheduler::run`] returns.
pub struct CrawlScheduler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn PageExtractor>,
    pool: WorkerPool,
    visited: VisitedSet,
    budget: PageBudget,
    pending: VecDeque<PendingTask<TaskOutcome>>,
}

impl CrawlScheduler {
    /// Creates a scheduler with `workers` workers and a budget of `max_pages`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the worker pool cannot be built.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn PageExtractor>,
        workers: usize,
        max_pages: usize,
    ) -> Result<Self, ConfigError> {
        let pool = WorkerPool::new(workers)?;

        Ok(Self {
            fetcher,
            extractor,
            pool,
            visited: VisitedSet::new(),
            budget: PageBudget::new(max_pages),
            pending: VecDeque::new(),
        })
    }

    /// Crawls the chain starting at `seed`
    ///
    /// # Termination
    ///
    /// The loop ends when the budget is exhausted or the queue is empty. In
    /// both cases the counter can no longer move: at the cap it is frozen,
    /// and with no task left nothing can increment it. The returned count is
    /// therefore exact even though in-flight tasks are abandoned.
    pub async fn run(mut self, seed: Url) -> CrawlOutcome {
        let seed = canonicalize(&seed);
        tracing::info!(
            "Starting concurrent crawl from {} ({} workers, budget {})",
            seed,
            self.pool.size(),
            self.budget.max()
        );

        self.visited.claim(&seed);
        self.submit(seed);

        let mut pages = Vec::new();

        while !self.budget.is_exhausted() {
            let Some(task) = self.pending.pop_front() else {
                tracing::info!("No pending tasks remain, chain exhausted");
                break;
            };

            let url = task.url().clone();
            let outcome = match task.wait().await {
                Ok(outcome) => outcome,
                Err(abort) => {
                    tracing::warn!("Task for {} produced no result: {}", url, abort);
                    continue;
                }
            };

            match outcome {
                TaskOutcome::Crawled { url, extraction } => {
                    pages.push(PageRecord {
                        url,
                        summary: extraction.summary,
                    });

                    if self.budget.is_exhausted() {
                        break;
                    }

                    if let Some(next) = extraction.next_url {
                        self.discover(next);
                    }
                }
                TaskOutcome::Failed { url, reason } => {
                    tracing::warn!("Failed to fetch {}: {}", url, reason);
                }
                TaskOutcome::Stale { url } => {
                    tracing::debug!("Discarded {}: budget already reached", url);
                }
            }
        }

        self.shutdown();

        let pages_crawled = self.budget.crawled();
        tracing::info!(
            "Concurrent crawl finished: {} pages, {} URLs claimed",
            pages_crawled,
            self.visited.claimed_count()
        );

        CrawlOutcome {
            pages_crawled,
            pages,
        }
    }

    /// Claims `url` and submits it if this is the first claim
    fn discover(&mut self, url: Url) {
        if self.visited.claim(&url) {
            tracing::debug!("Discovered {}", url);
            self.submit(url);
        } else {
            tracing::debug!("Skipping {}: already claimed", url);
        }
    }

    /// Hands a claimed URL to the pool and queues its handle
    fn submit(&mut self, url: Url) {
        let work = crawl_page(
            url.clone(),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            self.budget.clone(),
        );

        match self.pool.submit(url, work) {
            Some(task) => self.pending.push_back(task),
            None => tracing::debug!("Pool is shut down, submission dropped"),
        }
    }

    fn shutdown(&mut self) {
        let in_flight: Vec<_> = self.pending.drain(..).collect();
        self.pool.shutdown(in_flight);
    }
}

impl Drop for CrawlScheduler {
    fn drop(&mut self) {
        // Cancelled runs must not leave tasks behind
        self.shutdown();
    }
}

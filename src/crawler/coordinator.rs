//! Crawler coordinator - run orchestration
//!
//! This module wires a validated configuration to the collaborators a crawl
//! needs, including:
//! - Building the HTTP fetcher and the same-origin extractor
//! - Running either crawl strategy under a metrics collector
//! - Producing the final `CrawlReport`

use crate::config::{validate, validate_worker_count, Config};
use crate::crawler::extractor::{HtmlExtractor, PageExtractor};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::scheduler::CrawlScheduler;
use crate::crawler::sequential::SequentialCrawler;
use crate::crawler::CrawlOutcome;
use crate::output::{CrawlMode, CrawlReport, MetricsCollector};
use crate::url::{parse_canonical, Origin};
use crate::Result;
use std::sync::Arc;
use url::Url;

/// Main crawl coordinator
///
/// Holds everything that outlives a single run. Each call to
/// [`Coordinator::run_concurrent`] builds a fresh scheduler, so repeated runs
/// never share visited or budget state.
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn PageExtractor>,
    seed: Url,
}

impl Coordinator {
    /// Creates a coordinator that crawls over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(PagechainError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let seed = parse_canonical(&config.crawl.seed_url)?;
        let origin = Origin::of(&seed)?;
        tracing::debug!("Restricting crawl to origin {}", origin);

        let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
        let extractor = Arc::new(HtmlExtractor::new(origin, &config.extract));

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            extractor,
            seed,
        })
    }

    /// Creates a coordinator around caller-supplied collaborators
    pub fn with_collaborators(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Result<Self> {
        validate(&config)?;
        let seed = parse_canonical(&config.crawl.seed_url)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            extractor,
            seed,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Runs one crawl in `mode` with the configured worker count
    pub async fn run(&self, mode: CrawlMode) -> Result<CrawlReport> {
        match mode {
            CrawlMode::Sequential => Ok(self.run_sequential().await),
            CrawlMode::Concurrent => self.run_concurrent(self.config.crawl.workers).await,
        }
    }

    /// Runs the concurrent strategy with `workers` workers
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` before any fetch if `workers` is
    /// out of range.
    pub async fn run_concurrent(&self, workers: usize) -> Result<CrawlReport> {
        validate_worker_count(workers)?;

        let scheduler = CrawlScheduler::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            workers,
            self.config.crawl.max_pages,
        )?;

        let metrics = MetricsCollector::start(CrawlMode::Concurrent);
        let outcome = scheduler.run(self.seed.clone()).await;
        let report = metrics.finish(outcome.pages_crawled, workers);

        log_outcome(&report, &outcome);
        Ok(report)
    }

    /// Runs the sequential baseline
    pub async fn run_sequential(&self) -> CrawlReport {
        let crawler = SequentialCrawler::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            self.config.crawl.max_pages,
        );

        let metrics = MetricsCollector::start(CrawlMode::Sequential);
        let outcome = crawler.run(self.seed.clone()).await;
        let report = metrics.finish(outcome.pages_crawled, 1);

        log_outcome(&report, &outcome);
        report
    }
}

fn log_outcome(report: &CrawlReport, outcome: &CrawlOutcome) {
    tracing::info!(
        "{} crawl complete: {} pages in {:.4}s ({:.2} pages/sec), table total {:.2}",
        report.mode(),
        report.pages_crawled(),
        report.total_time_s(),
        report.pages_per_second(),
        outcome.table_total()
    );
}

/// Builds an HTTP coordinator from `config` and runs one crawl
pub async fn run_crawl(config: Config, mode: CrawlMode) -> Result<CrawlReport> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(mode).await
}

//! Run timing and the final crawl report

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Which crawl strategy produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlMode {
    Sequential,
    Concurrent,
}

impl CrawlMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final, immutable record of one crawl run
///
/// Serialized as a single JSON object on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    mode: CrawlMode,
    workers: usize,
    pages_crawled: usize,
    total_time_s: f64,
    pages_per_second: f64,
}

impl CrawlReport {
    /// Builds a report from a measured duration
    ///
    /// Elapsed time is rounded to 4 decimal places and throughput to 2.
    /// Throughput is `0.0` when the elapsed time rounds to zero.
    pub fn from_elapsed(
        mode: CrawlMode,
        workers: usize,
        pages_crawled: usize,
        elapsed: Duration,
    ) -> Self {
        let total_time_s = round_to(elapsed.as_secs_f64(), 4);
        let pages_per_second = if total_time_s > 0.0 {
            round_to(pages_crawled as f64 / total_time_s, 2)
        } else {
            0.0
        };

        Self {
            mode,
            workers,
            pages_crawled,
            total_time_s,
            pages_per_second,
        }
    }

    pub fn mode(&self) -> CrawlMode {
        self.mode
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn pages_crawled(&self) -> usize {
        self.pages_crawled
    }

    pub fn total_time_s(&self) -> f64 {
        self.total_time_s
    }

    pub fn pages_per_second(&self) -> f64 {
        self.pages_per_second
    }

    /// Single-line JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Times a run and produces its report
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    mode: CrawlMode,
    started: Instant,
}

impl MetricsCollector {
    /// Captures the start timestamp
    pub fn start(mode: CrawlMode) -> Self {
        Self {
            mode,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Captures the end timestamp and builds the report
    pub fn finish(&self, pages_crawled: usize, workers: usize) -> CrawlReport {
        let report = CrawlReport::from_elapsed(self.mode, workers, pages_crawled, self.elapsed());
        tracing::debug!(
            "{} run took {:.4}s ({:.2} pages/sec)",
            self.mode,
            report.total_time_s,
            report.pages_per_second
        );
        report
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

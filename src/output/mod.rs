//! Output module for crawl reports
//!
//! This module handles:
//! - Timing runs and building the immutable `CrawlReport`
//! - Emitting reports as JSON records on stdout
//! - Aggregating and writing the worker scaling summary

mod markdown;
mod report;

pub use markdown::{format_scaling_summary, generate_scaling_summary};
pub use report::{CrawlMode, CrawlReport, MetricsCollector};

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Averaged results for one worker count of the scaling experiment
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingResult {
    pub workers: usize,
    pub runs: usize,

    /// Pages crawled by the last run
    pub pages_crawled: usize,

    pub average_time_s: f64,
    pub average_pages_per_second: f64,
}

impl ScalingResult {
    /// Averages a non-empty set of reports for the same worker count
    pub fn from_reports(workers: usize, reports: &[CrawlReport]) -> Option<Self> {
        let last = reports.last()?;
        let runs = reports.len();

        let average_time_s = reports.iter().map(CrawlReport::total_time_s).sum::<f64>() / runs as f64;
        let average_pages_per_second =
            reports.iter().map(CrawlReport::pages_per_second).sum::<f64>() / runs as f64;

        Some(Self {
            workers,
            runs,
            pages_crawled: last.pages_crawled(),
            average_time_s,
            average_pages_per_second,
        })
    }
}

/// Writes `report` as one JSON line to `out`
pub fn write_report<W: Write>(out: &mut W, report: &CrawlReport) -> OutputResult<()> {
    let json = report.to_json()?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Writes `report` as one JSON line to stdout
pub fn emit_report(report: &CrawlReport) -> OutputResult<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, report)?;
    handle.flush()?;
    Ok(())
}

//! Worker-count scaling experiment

use crate::config::BenchmarkConfig;
use crate::crawler::coordinator::Coordinator;
use crate::output::{write_report, ScalingResult};
use crate::Result;
use std::io::Write;

/// Runs the concurrent crawl for every configured worker count
///
/// Each worker count is crawled `runs_per_experiment` times with a fresh
/// scheduler per run. Every run's JSON record is written to `out` as it
/// completes; the averaged results are returned in configuration order.
pub async fn run_scaling_experiment<W: Write>(
    coordinator: &Coordinator,
    benchmark: &BenchmarkConfig,
    out: &mut W,
) -> Result<Vec<ScalingResult>> {
    let mut results = Vec::with_capacity(benchmark.worker_counts.len());

    for &workers in &benchmark.worker_counts {
        tracing::info!(
            "Scaling experiment: {} workers, {} runs",
            workers,
            benchmark.runs_per_experiment
        );

        let mut reports = Vec::with_capacity(benchmark.runs_per_experiment);
        for run in 1..=benchmark.runs_per_experiment {
            let report = coordinator.run_concurrent(workers).await?;
            tracing::debug!(
                "Run {}/{} with {} workers: {:.4}s",
                run,
                benchmark.runs_per_experiment,
                workers,
                report.total_time_s()
            );
            write_report(out, &report)?;
            reports.push(report);
        }

        if let Some(result) = ScalingResult::from_reports(workers, &reports) {
            tracing::info!(
                "{} workers: average {:.4}s, {:.2} pages/sec",
                workers,
                result.average_time_s,
                result.average_pages_per_second
            );
            results.push(result);
        }
    }

    Ok(results)
}

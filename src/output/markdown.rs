//! Markdown summary of the scaling experiment

use crate::output::{OutputResult, ScalingResult};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the scaling results table to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_scaling_summary(
    results: &[ScalingResult],
    seed_url: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_scaling_summary(results, seed_url, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats scaling results as markdown
pub fn format_scaling_summary(
    results: &[ScalingResult],
    seed_url: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Pagechain Worker Scaling\n\n");
    md.push_str(&format!("- **Seed**: {}\n", seed_url));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if results.is_empty() {
        md.push_str("_No runs completed._\n");
        return md;
    }

    md.push_str("| Workers | Runs | Pages | Average Time (s) | Average Pages/sec |\n");
    md.push_str("|--------:|-----:|------:|-----------------:|------------------:|\n");

    for result in results {
        md.push_str(&format!(
            "| {} | {} | {} | {:.4} | {:.2} |\n",
            result.workers,
            result.runs,
            result.pages_crawled,
            result.average_time_s,
            result.average_pages_per_second
        ));
    }

    if let Some(best) = results.iter().max_by(|a, b| {
        a.average_pages_per_second
            .total_cmp(&b.average_pages_per_second)
    }) {
        md.push_str(&format!(
            "\nBest throughput: **{} workers** at {:.2} pages/sec.\n",
            best.workers, best.average_pages_per_second
        ));
    }

    md
}

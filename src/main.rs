//! Pagechain main entry point
//!
//! This is the command-line interface for the Pagechain crawler benchmark.

use anyhow::Context;
use clap::Parser;
use pagechain::config::{load_config_with_hash, Config};
use pagechain::crawler::{run_scaling_experiment, Coordinator};
use pagechain::output::{emit_report, generate_scaling_summary, CrawlMode};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Pagechain: a chain-following crawler benchmark
///
/// Pagechain follows the "Next" link from a seed page, sums a table column
/// on every page, and reports how many pages per second the crawl achieved.
/// Each run prints one JSON record to stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "pagechain")]
#[command(version)]
#[command(about = "A chain-following crawler benchmark", long_about = None)]
struct Cli {
    /// Number of concurrent workers
    #[arg(value_name = "WORKERS")]
    workers: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// First page of the chain
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Maximum number of pages to crawl
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Run the sequential baseline only
    #[arg(long, conflicts_with_all = ["compare", "scaling"])]
    sequential: bool,

    /// Run the sequential baseline, then the concurrent crawl
    #[arg(long, conflicts_with_all = ["sequential", "scaling"])]
    compare: bool,

    /// Run the worker-count scaling experiment
    #[arg(long, conflicts_with_all = ["sequential", "compare"])]
    scaling: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let coordinator = Coordinator::new(config).context("Failed to initialize crawler")?;

    if cli.scaling {
        handle_scaling(&coordinator).await
    } else if cli.compare {
        handle_crawl(&coordinator, CrawlMode::Sequential).await?;
        handle_crawl(&coordinator, CrawlMode::Concurrent).await
    } else if cli.sequential {
        handle_crawl(&coordinator, CrawlMode::Sequential).await
    } else {
        handle_crawl(&coordinator, CrawlMode::Concurrent).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagechain=info,warn"),
            1 => EnvFilter::new("pagechain=debug,info"),
            2 => EnvFilter::new("pagechain=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout is reserved for JSON records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawl.workers = workers;
    }
    if let Some(seed) = &cli.seed {
        config.crawl.seed_url = seed.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }

    Ok(config)
}

/// Runs one crawl and prints its JSON record
async fn handle_crawl(coordinator: &Coordinator, mode: CrawlMode) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} ({} mode, budget {})",
        coordinator.seed(),
        mode,
        coordinator.config().crawl.max_pages
    );

    let report = coordinator
        .run(mode)
        .await
        .with_context(|| format!("{} crawl failed", mode))?;
    emit_report(&report).context("Failed to write report")?;

    Ok(())
}

/// Runs the scaling experiment and writes the markdown summary
async fn handle_scaling(coordinator: &Coordinator) -> anyhow::Result<()> {
    let benchmark = coordinator.config().benchmark.clone();
    let mut stdout = std::io::stdout();

    let results = run_scaling_experiment(coordinator, &benchmark, &mut stdout)
        .await
        .context("Scaling experiment failed")?;

    let summary_path = Path::new(&benchmark.summary_path);
    generate_scaling_summary(&results, coordinator.seed().as_str(), summary_path)
        .with_context(|| format!("Failed to write summary to {}", summary_path.display()))?;

    tracing::info!("Scaling summary written to: {}", summary_path.display());
    Ok(())
}

use crate::config::types::{BenchmarkConfig, Config, CrawlConfig, ExtractConfig, HttpConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on the worker pool size
pub const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    validate_extract_config(&config.extract)?;
    validate_benchmark_config(&config.benchmark)?;
    Ok(())
}

/// Validates crawl scope and concurrency
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_seed_url(&config.seed_url)?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    validate_worker_count(config.workers)?;

    Ok(())
}

/// Validates a worker pool size
pub fn validate_worker_count(workers: usize) -> Result<(), ConfigError> {
    if workers < 1 || workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, workers
        )));
    }
    Ok(())
}

/// Validates that the seed is an absolute http(s) URL with a host
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    if config.link_marker.is_empty() {
        return Err(ConfigError::Validation(
            "link_marker cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_benchmark_config(config: &BenchmarkConfig) -> Result<(), ConfigError> {
    if config.worker_counts.is_empty() {
        return Err(ConfigError::Validation(
            "worker_counts must list at least one worker count".to_string(),
        ));
    }

    for &count in &config.worker_counts {
        validate_worker_count(count)?;
    }

    if config.runs_per_experiment < 1 {
        return Err(ConfigError::Validation(format!(
            "runs_per_experiment must be >= 1, got {}",
            config.runs_per_experiment
        )));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

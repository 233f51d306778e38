//! Configuration module for Pagechain
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) yields a
//! runnable configuration.
//!
//! # Example
//!
//! ```no_run
//! use pagechain::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pagechain.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawl.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BenchmarkConfig, Config, CrawlConfig, ExtractConfig, HttpConfig, DEFAULT_SEED_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_crawl_config, validate_worker_count, MAX_WORKERS};

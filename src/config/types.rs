use serde::Deserialize;

/// Seed used when neither the config file nor the command line names one
pub const DEFAULT_SEED_URL: &str = "http://192.168.0.141:5000/page_0.html";

/// Main configuration structure for Pagechain
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

/// Crawl scope and concurrency
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// First page of the chain
    #[serde(rename = "seed-url", default = "default_seed_url")]
    pub seed_url: String,

    /// Maximum number of successfully fetched pages
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Size of the worker pool used by the concurrent strategy
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Page extraction settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Text that identifies the successor link
    #[serde(rename = "link-marker", default = "default_link_marker")]
    pub link_marker: String,

    /// Zero-based table column that is summed
    #[serde(rename = "summary-column", default = "default_summary_column")]
    pub summary_column: usize,
}

/// Worker-count scaling experiment
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(rename = "worker-counts", default = "default_worker_counts")]
    pub worker_counts: Vec<usize>,

    #[serde(rename = "runs-per-experiment", default = "default_runs_per_experiment")]
    pub runs_per_experiment: usize,

    /// Where the markdown results table is written
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: default_seed_url(),
            max_pages: default_max_pages(),
            workers: default_workers(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            link_marker: default_link_marker(),
            summary_column: default_summary_column(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            worker_counts: default_worker_counts(),
            runs_per_experiment: default_runs_per_experiment(),
            summary_path: default_summary_path(),
        }
    }
}

fn default_seed_url() -> String {
    DEFAULT_SEED_URL.to_string()
}

fn default_max_pages() -> usize {
    20
}

fn default_workers() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("pagechain/{}", env!("CARGO_PKG_VERSION"))
}

fn default_link_marker() -> String {
    "Next".to_string()
}

fn default_summary_column() -> usize {
    4
}

fn default_worker_counts() -> Vec<usize> {
    vec![1, 2, 4, 8, 16, 32, 64, 128, 256]
}

fn default_runs_per_experiment() -> usize {
    2
}

fn default_summary_path() -> String {
    "./scaling_results.md".to_string()
}

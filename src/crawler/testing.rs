//! In-memory collaborators shared by the crawler unit tests

use crate::config::ExtractConfig;
use crate::crawler::extractor::HtmlExtractor;
use crate::crawler::fetcher::{FetchFailure, FetchResult, PageFetcher};
use crate::url::Origin;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const ORIGIN: &str = "http://chain.test";

pub fn page_url(n: usize) -> Url {
    Url::parse(&format!("{}/page_{}.html", ORIGIN, n)).unwrap()
}

/// HTML for page `n` with a one-row table and, optionally, a "Next" link
pub fn page_html(n: usize, next: Option<&str>) -> String {
    let link = next
        .map(|href| format!(r#"<a href="{}">Next</a>"#, href))
        .unwrap_or_default();
    format!(
        "<html><body><table><tr><th>D</th><th>O</th><th>H</th><th>L</th><th>C</th></tr>\
         <tr><td>{n}</td><td>0</td><td>0</td><td>0</td><td>{n}.5</td></tr></table>{link}</body></html>"
    )
}

pub fn extractor() -> Arc<HtmlExtractor> {
    let origin = Origin::parse(ORIGIN).unwrap();
    Arc::new(HtmlExtractor::new(origin, &ExtractConfig::default()))
}

/// Serves a fixed set of pages and counts fetches per URL
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, FetchResult>,
    fetches: Mutex<HashMap<String, usize>>,
    latency: Option<Duration>,
}

impl StubFetcher {
    /// A chain `page_0 -> page_1 -> ... -> page_{len-1}`
    pub fn chain(len: usize) -> Self {
        let mut fetcher = Self::default();
        for n in 0..len {
            let next = (n + 1 < len).then(|| format!("page_{}.html", n + 1));
            fetcher = fetcher.with_page(n, &page_html(n, next.as_deref()));
        }
        fetcher
    }

    pub fn with_page(mut self, n: usize, html: &str) -> Self {
        self.pages.insert(
            page_url(n).to_string(),
            FetchResult::Success {
                status: 200,
                body: html.to_string(),
            },
        );
        self
    }

    pub fn with_failure(mut self, n: usize, reason: FetchFailure) -> Self {
        self.pages
            .insert(page_url(n).to_string(), FetchResult::Failure(reason));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn fetch_count(&self, url: &Url) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(url.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }

    pub fn max_fetches_per_url(&self) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .values()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(url.as_str())
            .cloned()
            .unwrap_or(FetchResult::Failure(FetchFailure::Status(404)))
    }
}

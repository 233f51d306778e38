//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a chain of pages and drive the real
//! HTTP fetcher and HTML extractor end-to-end.

use pagechain::config::{Config, ExtractConfig, HttpConfig};
use pagechain::crawler::{Coordinator, CrawlScheduler, HtmlExtractor, HttpFetcher, SequentialCrawler};
use pagechain::output::CrawlMode;
use pagechain::url::Origin;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Page `n` of a chain, linking to `page_{n+1}` unless it is the last
fn chain_page(n: usize, has_next: bool) -> String {
    let next = if has_next {
        format!(r#"<p><a href="/page_{}.html">Next</a></p>"#, n + 1)
    } else {
        String::new()
    };

    format!(
        r#"<html><head><title>Page {n}</title></head><body>
        <table>
          <tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th></tr>
          <tr><td>2024-01-01</td><td>1</td><td>2</td><td>0.5</td><td>{n}</td></tr>
          <tr><td>2024-01-02</td><td>1</td><td>2</td><td>0.5</td><td>1</td></tr>
        </table>
        <a href="/about.html">About</a>
        {next}
        </body></html>"#
    )
}

/// Mounts page `n` on `server`
async fn mount_page(server: &MockServer, n: usize, has_next: bool) {
    Mock::given(method("GET"))
        .and(path(format!("/page_{}.html", n)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(chain_page(n, has_next))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts `page_0 .. page_{len-1}` on `server`
async fn mount_chain(server: &MockServer, len: usize) {
    for n in 0..len {
        mount_page(server, n, n + 1 < len).await;
    }
}

fn seed(server: &MockServer) -> Url {
    Url::parse(&format!("{}/page_0.html", server.uri())).unwrap()
}

fn test_config(server: &MockServer, max_pages: usize, workers: usize) -> Config {
    let mut config = Config::default();
    config.crawl.seed_url = seed(server).to_string();
    config.crawl.max_pages = max_pages;
    config.crawl.workers = workers;
    config.http.timeout_secs = 5;
    config
}

fn collaborators(server: &MockServer) -> (Arc<HttpFetcher>, Arc<HtmlExtractor>) {
    let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
    let origin = Origin::of(&seed(server)).unwrap();
    let extractor = HtmlExtractor::new(origin, &ExtractConfig::default());
    (Arc::new(fetcher), Arc::new(extractor))
}

async fn requests_for(server: &MockServer, page: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == page)
        .count()
}

#[tokio::test]
async fn test_short_chain_fully_crawled() {
    let server = MockServer::start().await;
    mount_chain(&server, 5).await;

    let coordinator = Coordinator::new(test_config(&server, 20, 4)).unwrap();
    let report = coordinator.run(CrawlMode::Concurrent).await.unwrap();

    assert_eq!(report.mode(), CrawlMode::Concurrent);
    assert_eq!(report.workers(), 4);
    assert_eq!(report.pages_crawled(), 5);
    assert!(report.pages_per_second() > 0.0);

    for n in 0..5 {
        assert_eq!(requests_for(&server, &format!("/page_{}.html", n)).await, 1);
    }
    assert_eq!(requests_for(&server, "/about.html").await, 0);
}

#[tokio::test]
async fn test_budget_caps_long_chain() {
    let server = MockServer::start().await;
    mount_chain(&server, 30).await;

    let (fetcher, extractor) = collaborators(&server);
    let outcome = CrawlScheduler::new(fetcher, extractor, 8, 20)
        .unwrap()
        .run(seed(&server))
        .await;

    assert_eq!(outcome.pages_crawled, 20);
    assert_eq!(requests_for(&server, "/page_20.html").await, 0);
}

#[tokio::test]
async fn test_seed_without_next_link() {
    let server = MockServer::start().await;
    mount_chain(&server, 1).await;

    let coordinator = Coordinator::new(test_config(&server, 20, 4)).unwrap();
    let report = coordinator.run(CrawlMode::Concurrent).await.unwrap();

    assert_eq!(report.pages_crawled(), 1);
}

#[tokio::test]
async fn test_failed_page_ends_chain() {
    let server = MockServer::start().await;

    for n in (0..3).chain(4..8) {
        mount_page(&server, n, n < 7).await;
    }
    Mock::given(method("GET"))
        .and(path("/page_3.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server, 20, 4)).unwrap();
    let report = coordinator.run(CrawlMode::Concurrent).await.unwrap();

    assert_eq!(report.pages_crawled(), 3);
    assert_eq!(requests_for(&server, "/page_3.html").await, 1);
    assert_eq!(requests_for(&server, "/page_4.html").await, 0);
}

#[tokio::test]
async fn test_unreachable_seed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default();
    config.crawl.seed_url = format!("http://{}/page_0.html", addr);
    config.http.connect_timeout_secs = 1;

    let coordinator = Coordinator::new(config).unwrap();
    let report = coordinator.run(CrawlMode::Concurrent).await.unwrap();

    assert_eq!(report.pages_crawled(), 0);
    assert_eq!(report.pages_per_second(), 0.0);
}

#[tokio::test]
async fn test_single_worker_matches_sequential() {
    let server = MockServer::start().await;
    mount_chain(&server, 10).await;

    let (fetcher, extractor) = collaborators(&server);

    let sequential = SequentialCrawler::new(fetcher.clone(), extractor.clone(), 20)
        .run(seed(&server))
        .await;
    let concurrent = CrawlScheduler::new(fetcher, extractor, 1, 20)
        .unwrap()
        .run(seed(&server))
        .await;

    assert_eq!(sequential.pages_crawled, 10);
    assert_eq!(concurrent.pages_crawled, 10);
    assert_eq!(sequential.pages, concurrent.pages);
}

#[tokio::test]
async fn test_table_totals_summed() {
    let server = MockServer::start().await;
    mount_chain(&server, 4).await;

    let (fetcher, extractor) = collaborators(&server);
    let outcome = CrawlScheduler::new(fetcher, extractor, 2, 20)
        .unwrap()
        .run(seed(&server))
        .await;

    // Page n contributes n + 1
    assert_eq!(outcome.table_total(), 10.0);
}

#[tokio::test]
async fn test_off_origin_next_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    mount_chain(&other, 2).await;

    Mock::given(method("GET"))
        .and(path("/page_0.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body><a href="{}/page_1.html">Next</a></body></html>"#,
            other.uri()
        )))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server, 20, 4)).unwrap();
    let report = coordinator.run(CrawlMode::Sequential).await.unwrap();

    assert_eq!(report.pages_crawled(), 1);
    assert_eq!(requests_for(&other, "/page_1.html").await, 0);
}

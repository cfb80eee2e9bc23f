//! Integration tests for the fetcher against a mock search endpoint.
//!
//! A `wiremock` server stands in for the results page and for content
//! pages, so these tests make no real network calls.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use querylens_search::{CacheKey, Fetcher, FetcherConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "QuerylensTest/1.0";

fn config_for(server: &MockServer) -> FetcherConfig {
    FetcherConfig {
        endpoint: format!("{}/html/", server.uri()),
        user_agent: UA.to_owned(),
        timeout_seconds: 5,
        content_timeout_seconds: 5,
        ..Default::default()
    }
}

fn result_block(i: usize, with_snippet: bool) -> String {
    let snippet = if with_snippet {
        format!(r#"<a class="result__snippet">Snippet number {i} about Rust.</a>"#)
    } else {
        String::new()
    };
    format!(
        r#"<div class="result results_links web-result">
             <h2 class="result__title"><a class="result__a" href="https://site{i}.example/">Title {i}</a></h2>
             {snippet}
           </div>"#
    )
}

fn results_page(blocks: &[String]) -> String {
    format!("<html><body><div id=\"links\">{}</div></body></html>", blocks.join("\n"))
}

#[tokio::test]
async fn three_well_formed_and_two_malformed_yield_three() {
    let server = MockServer::start().await;
    let blocks = vec![
        result_block(1, true),
        result_block(2, false),
        result_block(3, true),
        result_block(4, false),
        result_block(5, true),
    ];

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "rust programming"))
        .and(header("user-agent", UA))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&blocks)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let results = fetcher.search("rust programming", 5).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "Title 1");
    assert_eq!(results[1].url, "https://site3.example/");
    assert_eq!(results[2].snippet, "Snippet number 5 about Rust.");
}

#[tokio::test]
async fn repeated_search_hits_cache_without_second_request() {
    let server = MockServer::start().await;
    let blocks: Vec<String> = (1..=6).map(|i| result_block(i, true)).collect();

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&blocks)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let first = fetcher.search("cache me", 5).await;
    let second = fetcher.search("cache me", 5).await;

    assert_eq!(first.len(), 5);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(fetcher.cache().contains(&CacheKey::new("cache me", 5)));
}

#[tokio::test]
async fn concurrent_identical_searches_share_one_request() {
    let server = MockServer::start().await;
    let blocks: Vec<String> = (1..=5).map(|i| result_block(i, true)).collect();

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&blocks))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let (a, b) = tokio::join!(fetcher.search("same", 5), fetcher.search("same", 5));

    assert_eq!(a.len(), 5);
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn server_error_degrades_to_empty_and_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let err = fetcher.try_search("down", 5).await.unwrap_err();
    assert!(err.to_string().contains("HTTP error"));

    assert!(fetcher.search("down", 5).await.is_empty());
    assert!(!fetcher.cache().contains(&CacheKey::new("down", 5)));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&[result_block(1, true)]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = FetcherConfig {
        timeout_seconds: 1,
        ..config_for(&server)
    };
    let fetcher = Fetcher::new(config).unwrap();
    let err = fetcher.try_search("slow", 5).await.unwrap_err();
    assert!(err.to_string().contains("timed out"), "unexpected error: {err}");
}

#[tokio::test]
async fn empty_page_is_cached_as_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    assert!(fetcher.search("nothing", 5).await.is_empty());
    assert!(fetcher.search("nothing", 5).await.is_empty());
    assert!(fetcher.cache().contains(&CacheKey::new("nothing", 5)));
}

#[tokio::test]
async fn fetch_content_strips_script_and_style() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("user-agent", UA))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Article</title><style>p{}</style></head>\
             <body><p>First paragraph.</p><script>track()</script><p>Second.</p></body></html>",
        ))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let text = fetcher
        .fetch_content(&format!("{}/article", server.uri()))
        .await;
    assert_eq!(text, "Article First paragraph. Second.");
}

#[tokio::test]
async fn fetch_content_failure_yields_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(config_for(&server)).unwrap();
    let url = format!("{}/missing", server.uri());
    assert!(fetcher.try_fetch_content(&url).await.is_err());
    assert_eq!(fetcher.fetch_content(&url).await, "");
    assert_eq!(fetcher.fetch_content("not a url").await, "");
}

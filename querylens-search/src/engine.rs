//! Trait definition for pluggable search result providers.
//!
//! The [`crate::Fetcher`] is generic over [`SearchProvider`] so the scraping
//! backend can be swapped (or mocked) without touching caching or the
//! safe-default contract.

use crate::config::FetcherConfig;
use crate::error::SearchError;
use crate::types::SearchResult;

/// A source of search results.
///
/// Implementors handle their own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - HTML parsing via CSS selectors
///
/// All implementations must be `Send + Sync` so a fetcher can be shared
/// between concurrent request handlers.
pub trait SearchProvider: Send + Sync {
    /// Perform one search and return at most `max_results` parsed results.
    ///
    /// # Arguments
    ///
    /// * `client`: Pre-configured HTTP client (User-Agent, timeout).
    /// * `config`: Fetcher configuration; supplies the endpoint.
    /// * `query`: Raw query text; the implementation handles encoding.
    /// * `max_results`: Already-clamped upper bound on returned results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails or the response
    /// cannot be parsed.
    fn search(
        &self,
        client: &reqwest::Client,
        config: &FetcherConfig,
        query: &str,
        max_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Human-readable provider name, used in logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    /// A mock provider for testing trait bounds and async execution.
    struct MockProvider {
        results: Vec<SearchResult>,
    }

    impl SearchProvider for MockProvider {
        async fn search(
            &self,
            _client: &reqwest::Client,
            _config: &FetcherConfig,
            _query: &str,
            max_results: usize,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if self.results.is_empty() {
                return Err(SearchError::Parse("mock provider failure".into()));
            }
            Ok(self.results.iter().take(max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "Mock"
        }
    }

    fn client() -> reqwest::Client {
        reqwest::Client::new()
    }

    #[test]
    fn mock_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
    }

    #[tokio::test]
    async fn mock_provider_respects_bound() {
        let provider = MockProvider {
            results: (0..8)
                .map(|i| SearchResult::new(format!("T{i}"), format!("https://t{i}.com"), "s"))
                .collect(),
        };
        let results = provider
            .search(&client(), &FetcherConfig::default(), "test", 5)
            .await
            .expect("should succeed");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].title, "T0");
    }

    #[tokio::test]
    async fn mock_provider_propagates_errors() {
        let provider = MockProvider { results: vec![] };
        let result = provider
            .search(&client(), &FetcherConfig::default(), "test", 5)
            .await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("mock provider failure"));
        assert_eq!(provider.name(), "Mock");
    }
}

//! The fetcher facade: cached search plus page content retrieval.
//!
//! Every operation comes in two forms. The `try_*` form returns a
//! [`Result`]; the plain form never fails and returns a safe default
//! (empty list, empty string) after logging the error.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, CachedResults, ResultCache};
use crate::config::{clamp_max_results, FetcherConfig};
use crate::content::extract_visible_text;
use crate::engine::SearchProvider;
use crate::engines::DuckDuckGoEngine;
use crate::error::{Result, SearchError};
use crate::http;

/// Fetches search results and page text, memoising searches in an owned cache.
#[derive(Debug)]
pub struct Fetcher<P = DuckDuckGoEngine> {
    config: FetcherConfig,
    provider: P,
    cache: ResultCache,
    search_client: reqwest::Client,
    content_client: reqwest::Client,
}

impl Fetcher<DuckDuckGoEngine> {
    /// Build a fetcher backed by DuckDuckGo.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid config, or
    /// [`SearchError::Http`] if an HTTP client cannot be constructed.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        Self::with_provider(config, DuckDuckGoEngine)
    }
}

impl<P: SearchProvider> Fetcher<P> {
    /// Build a fetcher backed by a custom provider.
    ///
    /// # Errors
    ///
    /// Same as [`Fetcher::new`].
    pub fn with_provider(config: FetcherConfig, provider: P) -> Result<Self> {
        config.validate()?;
        let search_client = http::build_client(
            &config.user_agent,
            Duration::from_secs(config.timeout_seconds),
        )?;
        let content_client = http::build_client(
            &config.user_agent,
            Duration::from_secs(config.content_timeout_seconds),
        )?;
        let cache = ResultCache::new(config.cache_policy.clone());
        Ok(Self {
            config,
            provider,
            cache,
            search_client,
            content_client,
        })
    }

    /// The configuration this fetcher was built with.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// The search provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The owned result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Search for `query`, returning at most `max_results` results.
    ///
    /// `max_results` is clamped into `[MIN_RESULTS, MAX_RESULTS]` and the
    /// clamped value is part of the cache key. A cache hit returns the
    /// cached list itself; a miss performs exactly one provider request and
    /// caches the result only on success. Concurrent identical calls share
    /// one in-flight request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for a blank query, otherwise whatever
    /// the provider reports.
    pub async fn try_search(&self, query: &str, max_results: usize) -> Result<CachedResults> {
        if query.trim().is_empty() {
            return Err(SearchError::Config("query must not be empty".into()));
        }
        let max_results = clamp_max_results(max_results);
        let key = CacheKey::new(query, max_results);

        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(count = hit.len(), "search cache hit");
            return Ok(hit);
        }

        self.cache
            .get_or_try_insert_with(key, async {
                tracing::trace!(
                    query,
                    max_results,
                    provider = self.provider.name(),
                    "search cache miss"
                );
                let results = self
                    .provider
                    .search(&self.search_client, &self.config, query, max_results)
                    .await?;
                tracing::debug!(count = results.len(), "search results fetched");
                Ok(Arc::new(results))
            })
            .await
    }

    /// Search for `query`; any failure yields an empty list.
    ///
    /// Safe default: `Arc::new(Vec::new())`, never cached.
    pub async fn search(&self, query: &str, max_results: usize) -> CachedResults {
        match self.try_search(query, max_results).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(error = %err, "search failed, returning no results");
                Arc::new(Vec::new())
            }
        }
    }

    /// Fetch `url` and return its visible text.
    ///
    /// Uses the content timeout (10 seconds by default).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an empty URL, [`SearchError::Timeout`]
    /// or [`SearchError::Http`] for transport failures and non-success statuses.
    pub async fn try_fetch_content(&self, url: &str) -> Result<String> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SearchError::Config("url must not be empty".into()));
        }

        let response = self
            .content_client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("content request failed", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("content HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("content read failed", &e))?;

        let text = extract_visible_text(&html);
        tracing::debug!(bytes = html.len(), chars = text.len(), "page content extracted");
        Ok(text)
    }

    /// Fetch `url` and return its visible text; any failure yields `""`.
    pub async fn fetch_content(&self, url: &str) -> String {
        match self.try_fetch_content(url).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(url, error = %err, "content fetch failed");
                String::new()
            }
        }
    }
}

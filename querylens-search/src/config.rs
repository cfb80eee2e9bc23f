//! Fetcher configuration with sensible defaults.
//!
//! [`FetcherConfig`] controls the search endpoint, request timeouts, the
//! User-Agent header and the cache eviction policy. The result-count bound is
//! not part of the config: it is supplied per call and clamped with
//! [`clamp_max_results`].

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cache::CachePolicy;
use crate::error::SearchError;

/// Smallest number of results a search may request.
pub const MIN_RESULTS: usize = 5;

/// Largest number of results a search may request.
pub const MAX_RESULTS: usize = 20;

/// Result count used when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// HTML-only DuckDuckGo endpoint; needs no JavaScript.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Fixed desktop browser User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Clamp a requested result count into `[MIN_RESULTS, MAX_RESULTS]`.
pub fn clamp_max_results(requested: usize) -> usize {
    requested.clamp(MIN_RESULTS, MAX_RESULTS)
}

/// Configuration for a [`crate::Fetcher`].
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Search results page, queried with `GET <endpoint>?q=<query>`.
    pub endpoint: String,
    /// Timeout for the search request in seconds.
    pub timeout_seconds: u64,
    /// Timeout for [`crate::Fetcher::fetch_content`] requests in seconds.
    pub content_timeout_seconds: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Eviction policy for the owned result cache.
    pub cache_policy: CachePolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout_seconds: 15,
            content_timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cache_policy: CachePolicy::default(),
        }
    }
}

impl FetcherConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` must be an absolute `http` or `https` URL
    /// - both timeouts must be greater than 0
    /// - `user_agent` must not be blank
    /// - the cache policy must be valid
    pub fn validate(&self) -> Result<(), SearchError> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| SearchError::Config(format!("invalid endpoint URL: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "endpoint must use http or https".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.content_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "content_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        self.cache_policy.validate()
    }
}

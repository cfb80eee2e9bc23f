//! # querylens-search
//!
//! Search-result snippet fetching for querylens.
//!
//! This crate issues one HTTP GET per query against a public HTML search
//! page, extracts `(title, url, snippet)` triples with CSS selectors and
//! memoises them in an owned in-process cache. It also fetches arbitrary
//! pages and reduces them to their visible text.
//!
//! ## Design
//!
//! - Scrapes the JavaScript-free DuckDuckGo HTML endpoint
//! - Pluggable backends behind [`SearchProvider`]
//! - Owned [`ResultCache`] keyed by `(query, max_results)`; never evicts by
//!   default, bounded policies available
//! - Concurrent identical searches share one in-flight request
//! - Every entry point has a `try_*` form returning [`Result`] and a
//!   safe-default form that logs and returns empty data
//!
//! ## Security
//!
//! - No network listeners; this is a library, not a server
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod types;

pub use cache::{CacheKey, CachePolicy, CachedResults, ResultCache};
pub use config::{
    clamp_max_results, FetcherConfig, DEFAULT_MAX_RESULTS, MAX_RESULTS, MIN_RESULTS,
};
pub use engine::SearchProvider;
pub use engines::DuckDuckGoEngine;
pub use error::{Result, SearchError};
pub use fetcher::Fetcher;
pub use types::SearchResult;

/// Search once with a throwaway DuckDuckGo fetcher and default config.
///
/// Convenience wrapper for one-off use; long-lived callers should hold a
/// [`Fetcher`] so the cache is reused.
///
/// # Errors
///
/// Same as [`Fetcher::try_search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> querylens_search::Result<()> {
/// let results = querylens_search::search_once("rust programming", 10).await?;
/// for result in results.iter() {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_once(query: &str, max_results: usize) -> Result<CachedResults> {
    Fetcher::new(FetcherConfig::default())?
        .try_search(query, max_results)
        .await
}

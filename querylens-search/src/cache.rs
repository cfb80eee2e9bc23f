//! In-memory cache for search results.
//!
//! Caches result lists keyed by the (query, clamped result bound) pair.
//! The cache is an owned value held by the [`crate::Fetcher`], backed by
//! [`moka`] so concurrent callers can share it. The default policy never
//! evicts; [`CachePolicy::Bounded`] caps entries and optionally expires them.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::SearchResult;

/// Cache key: the literal query and the clamped result bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    max_results: usize,
}

impl CacheKey {
    /// Build a key. The query is kept verbatim; `"Rust"` and `"rust"` are
    /// distinct entries.
    pub fn new(query: &str, max_results: usize) -> Self {
        Self {
            query: query.to_owned(),
            max_results,
        }
    }

    /// The query this key was built from.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The result bound this key was built from.
    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

/// Eviction policy for a [`ResultCache`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachePolicy {
    /// Keep every entry for the lifetime of the cache.
    #[default]
    Unbounded,
    /// Cap the number of entries, optionally expiring them after a TTL.
    Bounded {
        /// Maximum number of cached result lists.
        max_entries: u64,
        /// Time-to-live in seconds; `None` never expires.
        #[serde(default)]
        ttl_seconds: Option<u64>,
    },
}

impl CachePolicy {
    /// Validate the policy parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        match self {
            Self::Unbounded => Ok(()),
            Self::Bounded { max_entries: 0, .. } => Err(SearchError::Config(
                "cache max_entries must be greater than 0".into(),
            )),
            Self::Bounded {
                ttl_seconds: Some(0),
                ..
            } => Err(SearchError::Config(
                "cache ttl_seconds must be greater than 0".into(),
            )),
            Self::Bounded { .. } => Ok(()),
        }
    }
}

/// Shared result list handed out by the cache.
pub type CachedResults = Arc<Vec<SearchResult>>;

/// Owned search-result cache.
///
/// Cloning is cheap and yields a handle to the same underlying storage.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<CacheKey, CachedResults>,
    policy: CachePolicy,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("policy", &self.policy)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl ResultCache {
    /// Create an empty cache governed by `policy`.
    pub fn new(policy: CachePolicy) -> Self {
        let inner = match &policy {
            CachePolicy::Unbounded => Cache::builder().build(),
            CachePolicy::Bounded {
                max_entries,
                ttl_seconds,
            } => {
                let builder = Cache::builder().max_capacity(*max_entries);
                match ttl_seconds {
                    Some(secs) => builder.time_to_live(Duration::from_secs(*secs)).build(),
                    None => builder.build(),
                }
            }
        };
        Self { inner, policy }
    }

    /// The policy this cache was built with.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Look up cached results for the given key.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedResults> {
        self.inner.get(key).await
    }

    /// Insert a result list, replacing any previous entry for `key`.
    pub async fn insert(&self, key: CacheKey, results: CachedResults) {
        self.inner.insert(key, results).await;
    }

    /// Return the cached entry for `key`, or run `init` to produce it.
    ///
    /// Concurrent calls for the same key wait on a single `init`. A failed
    /// `init` is reported to every waiter and leaves nothing cached.
    pub async fn get_or_try_insert_with<F>(
        &self,
        key: CacheKey,
        init: F,
    ) -> Result<CachedResults, SearchError>
    where
        F: Future<Output = Result<CachedResults, SearchError>>,
    {
        self.inner
            .try_get_with(key, init)
            .await
            .map_err(|e: Arc<SearchError>| (*e).clone())
    }

    /// Whether an entry exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of cached result lists.
    ///
    /// Flushes pending maintenance first so the count is exact.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

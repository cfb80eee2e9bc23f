//! Shared HTTP client construction for search and content requests.
//!
//! Provides a configured [`reqwest::Client`] with a fixed browser-like
//! User-Agent, compressed transfer support and a bounded timeout.

use std::time::Duration;

use crate::error::SearchError;

/// Build a [`reqwest::Client`] configured for scraping.
///
/// The client has:
/// - The given User-Agent on every request
/// - The given overall request timeout
/// - Brotli and gzip decompression
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

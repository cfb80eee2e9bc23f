//! Core search result type.

use serde::{Deserialize, Serialize};

/// A single search result scraped from the results page.
///
/// Produced once per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result.
    pub url: String,
    /// A short text excerpt describing the page.
    pub snippet: String,
}

impl SearchResult {
    /// Build a result from its three parts.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

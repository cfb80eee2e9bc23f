//! Error types for the querylens-search crate.
//!
//! All errors carry stable string messages suitable for logging and for
//! display next to a degraded result.

/// Errors that can occur while fetching search results or page content.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request exceeded its configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Failed to parse a search results page.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid fetcher configuration or request arguments.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a [`reqwest::Error`], separating timeouts from other
    /// transport failures.
    pub(crate) fn from_reqwest(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for querylens-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

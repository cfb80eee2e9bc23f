//! Error types for the querylens pipeline.

/// Top-level error type for search, analysis and presentation.
#[derive(Debug, thiserror::Error)]
pub enum QueryLensError {
    /// Search-result or page fetching error.
    #[error("search error: {0}")]
    Search(#[from] querylens_search::SearchError),

    /// Text preprocessing, entity extraction or summarisation error.
    #[error("text error: {0}")]
    Text(String),

    /// Search-result analysis error.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// Report generation or CSV export error.
    #[error("report error: {0}")]
    Report(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, QueryLensError>;

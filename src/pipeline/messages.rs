//! Outcome types produced by a pipeline run.

use querylens_search::CachedResults;

use crate::analysis::{AnalysisRecord, Report};

/// Everything produced for one query that returned results.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The query as submitted.
    pub query: String,
    /// The clamped result bound the search ran with.
    pub max_results: usize,
    /// Search results, shared with the fetcher cache.
    pub results: CachedResults,
    /// Analysis of the result snippets.
    pub analysis: AnalysisRecord,
    /// Flattened `Metric`/`Value` report.
    pub report: Report,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// The query was empty or whitespace; nothing was searched.
    EmptyQuery,
    /// The search returned no results (or failed and degraded to none).
    NoResults {
        /// The query as submitted.
        query: String,
    },
    /// Results were found, analysed and reported.
    Complete(Box<PipelineOutput>),
}

impl PipelineOutcome {
    /// The completed output, if any.
    pub fn output(&self) -> Option<&PipelineOutput> {
        match self {
            Self::Complete(output) => Some(output),
            _ => None,
        }
    }
}

//! Runs a query through search, analysis and report generation.

use querylens_search::{DuckDuckGoEngine, Fetcher, SearchProvider, clamp_max_results};
use tracing::{debug, info, trace};

use super::messages::{PipelineOutcome, PipelineOutput};
use crate::analysis::{Analyzer, generate_report};
use crate::config::AppConfig;
use crate::error::Result;

/// The `search → analyze → report` pipeline.
///
/// Data flows one way. The fetcher cache persists for the lifetime of the
/// pipeline, so repeating a query does not search again.
#[derive(Debug)]
pub struct Pipeline<P = DuckDuckGoEngine> {
    fetcher: Fetcher<P>,
    analyzer: Analyzer,
}

impl Pipeline<DuckDuckGoEngine> {
    /// Build a DuckDuckGo-backed pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP clients
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(config.fetcher_config())?;
        Ok(Self::new(
            fetcher,
            Analyzer::new(config.analysis.clone(), config.text.clone()),
        ))
    }
}

impl<P: SearchProvider> Pipeline<P> {
    /// Assemble a pipeline from its stages.
    pub fn new(fetcher: Fetcher<P>, analyzer: Analyzer) -> Self {
        Self { fetcher, analyzer }
    }

    /// The search stage.
    pub fn fetcher(&self) -> &Fetcher<P> {
        &self.fetcher
    }

    /// The analysis stage.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Run `query` through every stage.
    ///
    /// An empty or whitespace query is rejected before searching. A search
    /// that fails degrades to no results.
    pub async fn run(&self, query: &str, max_results: usize) -> PipelineOutcome {
        if query.trim().is_empty() {
            debug!("empty query, skipping search");
            return PipelineOutcome::EmptyQuery;
        }
        let max_results = clamp_max_results(max_results);
        trace!(query, max_results, "search");

        let results = self.fetcher.search(query, max_results).await;
        if results.is_empty() {
            info!(query, "search returned no results");
            return PipelineOutcome::NoResults {
                query: query.to_owned(),
            };
        }
        debug!(count = results.len(), "analyze");

        let analysis = self.analyzer.analyze_search_results(&results);
        let report = generate_report(query, &results, &analysis);
        debug!(rows = report.len(), "report");

        PipelineOutcome::Complete(Box::new(PipelineOutput {
            query: query.to_owned(),
            max_results,
            results,
            analysis,
            report,
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use querylens_search::{FetcherConfig, SearchError, SearchResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FixedProvider {
        calls: AtomicUsize,
        results: Vec<SearchResult>,
        fail: bool,
    }

    impl SearchProvider for FixedProvider {
        async fn search(
            &self,
            _client: &reqwest::Client,
            _config: &FetcherConfig,
            _query: &str,
            max_results: usize,
        ) -> std::result::Result<Vec<SearchResult>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SearchError::Http("down".into()));
            }
            Ok(self.results.iter().take(max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }
    }

    fn pipeline(provider: FixedProvider) -> Pipeline<FixedProvider> {
        let fetcher =
            Fetcher::with_provider(FetcherConfig::default(), provider).expect("valid config");
        Pipeline::new(fetcher, Analyzer::default())
    }

    fn rust_provider() -> FixedProvider {
        FixedProvider {
            results: vec![
                SearchResult::new(
                    "Rust",
                    "https://www.rust-lang.org/",
                    "The Rust language is fast.",
                ),
                SearchResult::new("Docs", "https://doc.rust-lang.org/", "Rust enables safety."),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_query_is_not_searched() {
        let pipeline = pipeline(rust_provider());
        assert!(matches!(pipeline.run("   ", 10).await, PipelineOutcome::EmptyQuery));
        assert_eq!(pipeline.fetcher().cache().entry_count().await, 0);
    }

    #[tokio::test]
    async fn complete_run_produces_every_artifact() {
        let pipeline = pipeline(rust_provider());
        let outcome = pipeline.run("rust", 10).await;
        let output = outcome.output().expect("complete");

        assert_eq!(output.query, "rust");
        assert_eq!(output.results.len(), 2);
        assert_eq!(output.analysis.total_results, 2);
        assert_eq!(output.analysis.word_count("rust"), Some(2));
        assert_eq!(
            output.report.len(),
            1 + output.analysis.word_frequency.len() + output.analysis.entity_count()
        );
    }

    #[tokio::test]
    async fn bound_is_clamped() {
        let pipeline = pipeline(rust_provider());
        let outcome = pipeline.run("rust", 100).await;
        assert_eq!(outcome.output().map(|o| o.max_results), Some(20));
        let outcome = pipeline.run("rust", 1).await;
        assert_eq!(outcome.output().map(|o| o.max_results), Some(5));
    }

    #[tokio::test]
    async fn failed_search_yields_no_results() {
        let pipeline = pipeline(FixedProvider {
            fail: true,
            ..rust_provider()
        });
        match pipeline.run("rust", 10).await {
            PipelineOutcome::NoResults { query } => assert_eq!(query, "rust"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_query_searches_once() {
        let pipeline = pipeline(rust_provider());
        pipeline.run("rust", 10).await;
        pipeline.run("rust", 10).await;
        assert_eq!(pipeline.fetcher().provider().calls.load(Ordering::SeqCst), 1);
    }
}

//! Aggregate analysis of a list of search results.

use querylens_search::SearchResult;

use super::counter::most_common;
use super::types::{AnalysisRecord, EntityGroup, TermCount};
use crate::config::{AnalysisConfig, TextConfig};
use crate::error::{QueryLensError, Result};
use crate::text::TextProcessor;

/// Combines the snippets of a result list and derives word frequencies,
/// ranked entities and a summary from them.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    processor: TextProcessor,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with the given limits.
    pub fn new(config: AnalysisConfig, text: TextConfig) -> Self {
        Self {
            processor: TextProcessor::new(text),
            config,
        }
    }

    /// The ranking limits in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The text processor in use.
    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    /// Analyse `results`.
    ///
    /// # Errors
    ///
    /// Fails if the joined snippet text exceeds `max_input_bytes` or if any
    /// text processing step fails. Partial results are discarded.
    pub fn try_analyze(&self, results: &[SearchResult]) -> Result<AnalysisRecord> {
        let text = results
            .iter()
            .map(|r| r.snippet.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if text.len() > self.config.max_input_bytes {
            return Err(QueryLensError::Analysis(format!(
                "snippet text of {} bytes exceeds the {} byte limit",
                text.len(),
                self.config.max_input_bytes
            )));
        }

        let tokens = self.processor.try_preprocess_text(&text)?;
        let word_frequency = most_common(tokens, self.config.top_words)
            .into_iter()
            .map(|(term, count)| TermCount { term, count })
            .collect::<Vec<_>>();

        let entities = self.processor.try_extract_entities(&text)?;
        let entity_analysis = self.group_entities(entities.into_iter().map(|e| (e.kind, e.text)));

        let summary = self.processor.try_get_summary(&text)?;

        tracing::debug!(
            results = results.len(),
            words = word_frequency.len(),
            entity_types = entity_analysis.len(),
            "analysis complete"
        );

        Ok(AnalysisRecord {
            total_results: results.len(),
            word_frequency,
            entity_analysis,
            summary,
        })
    }

    /// [`try_analyze`](Self::try_analyze), returning
    /// [`AnalysisRecord::unavailable`] on any failure.
    pub fn analyze_search_results(&self, results: &[SearchResult]) -> AnalysisRecord {
        self.try_analyze(results).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "analysis failed, returning placeholder record");
            AnalysisRecord::unavailable()
        })
    }

    fn group_entities(
        &self,
        tagged: impl Iterator<Item = (&'static str, String)>,
    ) -> Vec<EntityGroup> {
        let mut groups: Vec<(&'static str, Vec<String>)> = Vec::new();
        for (kind, text) in tagged {
            match groups.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, members)) => members.push(text),
                None => groups.push((kind, vec![text])),
            }
        }

        groups
            .into_iter()
            .map(|(kind, members)| EntityGroup {
                entity_type: kind.to_owned(),
                entities: most_common(members, self.config.top_entities)
                    .into_iter()
                    .map(|(term, count)| TermCount { term, count })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::text::ENTITY_LABEL;

    fn result(snippet: &str) -> SearchResult {
        SearchResult::new("title", "https://example.com/", snippet)
    }

    fn rust_results() -> Vec<SearchResult> {
        vec![
            result("The Rust language is fast."),
            result("Rust enables safety."),
        ]
    }

    #[test]
    fn counts_words_without_stopwords() {
        let record = Analyzer::default().analyze_search_results(&rust_results());
        assert_eq!(record.total_results, 2);
        assert!(record.word_count("rust").is_some_and(|n| n >= 2));
        assert_eq!(record.word_frequency[0], TermCount::new("rust", 2));
        assert!(record.word_count("the").is_none());
        assert!(record.word_count("is").is_none());
    }

    #[test]
    fn groups_capitalised_entities() {
        let record = Analyzer::default().analyze_search_results(&rust_results());
        assert_eq!(record.entity_analysis.len(), 1);
        let entities = record.entities_of(ENTITY_LABEL).expect("entity group");
        assert_eq!(entities[0], TermCount::new("Rust", 2));
        assert_eq!(entities[1], TermCount::new("The", 1));
    }

    #[test]
    fn summary_comes_from_snippets() {
        let record = Analyzer::default().analyze_search_results(&rust_results());
        assert_eq!(record.summary, "The Rust language is fast. Rust enables safety.");
    }

    #[test]
    fn empty_results_give_empty_maps() {
        let record = Analyzer::default().analyze_search_results(&[]);
        assert_eq!(record.total_results, 0);
        assert!(record.word_frequency.is_empty());
        assert!(record.entity_analysis.is_empty());
        assert_eq!(record.summary, "...");
    }

    #[test]
    fn word_and_entity_lists_are_capped() {
        let words: Vec<String> = (0..40).map(|i| format!("Word{i}x")).collect();
        let results = vec![result(&words.join(" "))];
        let record = Analyzer::default().analyze_search_results(&results);
        assert_eq!(record.word_frequency.len(), 20);
        assert_eq!(record.entities_of(ENTITY_LABEL).map(<[TermCount]>::len), Some(5));
    }

    #[test]
    fn total_tracks_result_count_within_caps() {
        let analyzer = Analyzer::default();
        for n in 0..=20 {
            let results: Vec<SearchResult> = (0..n)
                .map(|i| result(&format!("Rust Alpha{i} Beta{i} Gamma{i} word{i} item{i}.")))
                .collect();
            let record = analyzer.analyze_search_results(&results);
            assert_eq!(record.total_results, n);
            assert!(record.word_frequency.len() <= 20);
            assert!(record.entity_analysis.iter().all(|g| g.entities.len() <= 5));
            if n > 0 {
                assert_eq!(record.word_count("rust"), Some(n));
            }
        }
    }

    #[test]
    fn oversized_input_makes_whole_record_unavailable() {
        let analyzer = Analyzer::new(
            AnalysisConfig {
                max_input_bytes: 10,
                ..Default::default()
            },
            TextConfig::default(),
        );
        assert!(analyzer.try_analyze(&rust_results()).is_err());
        assert_eq!(
            analyzer.analyze_search_results(&rust_results()),
            AnalysisRecord::unavailable()
        );
    }

    #[test]
    fn text_failure_discards_partial_results() {
        let analyzer = Analyzer::new(
            AnalysisConfig::default(),
            TextConfig {
                max_input_bytes: 10,
                ..Default::default()
            },
        );
        assert_eq!(
            analyzer.analyze_search_results(&rust_results()),
            AnalysisRecord::unavailable()
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let analyzer = Analyzer::default();
        let results = rust_results();
        assert_eq!(
            analyzer.analyze_search_results(&results),
            analyzer.analyze_search_results(&results)
        );
    }
}

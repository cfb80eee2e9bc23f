//! Analysis record and report row types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary text of the placeholder record.
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";

/// A term and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    /// The word or entity.
    pub term: String,
    /// Number of occurrences.
    pub count: usize,
}

impl TermCount {
    /// Build a term count.
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// The ranked entities of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityGroup {
    /// Entity type label.
    pub entity_type: String,
    /// Most frequent entities of this type, highest count first.
    pub entities: Vec<TermCount>,
}

/// Analysis of one list of search results.
///
/// Derived deterministically from the results; analysing the same list twice
/// yields equal records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Number of results analysed.
    pub total_results: usize,
    /// Most frequent words, highest count first.
    pub word_frequency: Vec<TermCount>,
    /// Entity groups in first-seen type order.
    pub entity_analysis: Vec<EntityGroup>,
    /// Extractive summary of the snippets.
    pub summary: String,
}

impl AnalysisRecord {
    /// The record returned when analysis fails.
    pub fn unavailable() -> Self {
        Self {
            total_results: 0,
            word_frequency: Vec::new(),
            entity_analysis: Vec::new(),
            summary: ANALYSIS_UNAVAILABLE.to_owned(),
        }
    }

    /// Count recorded for `word`, if it made the top list.
    pub fn word_count(&self, word: &str) -> Option<usize> {
        self.word_frequency
            .iter()
            .find(|tc| tc.term == word)
            .map(|tc| tc.count)
    }

    /// Entities recorded for `entity_type`, if any.
    pub fn entities_of(&self, entity_type: &str) -> Option<&[TermCount]> {
        self.entity_analysis
            .iter()
            .find(|group| group.entity_type == entity_type)
            .map(|group| group.entities.as_slice())
    }

    /// Total number of ranked entities across all types.
    pub fn entity_count(&self) -> usize {
        self.entity_analysis.iter().map(|g| g.entities.len()).sum()
    }
}

/// The value column of a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// A plain count.
    Count(usize),
    /// Free text, such as `Rust (3)`.
    Text(String),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One flattened `(Metric, Value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// What is measured.
    pub metric: String,
    /// The measurement.
    pub value: ReportValue,
}

/// A two-column `Metric`/`Value` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Column headers.
    pub const COLUMNS: [&'static str; 2] = ["Metric", "Value"];

    /// A table with headers and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

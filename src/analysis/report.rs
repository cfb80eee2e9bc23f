//! Flattening an analysis record into a `Metric`/`Value` table, and CSV export.

use querylens_search::SearchResult;

use super::types::{AnalysisRecord, Report, ReportRow, ReportValue};
use crate::error::{QueryLensError, Result};

const MAX_FILENAME_STEM_CHARS: usize = 100;

/// Flatten `analysis` into report rows.
///
/// One `Total Results` row, then one row per word, then one row per entity
/// of each type. `query` and `results` are not consulted.
pub fn generate_report(
    _query: &str,
    _results: &[SearchResult],
    analysis: &AnalysisRecord,
) -> Report {
    let mut rows = Vec::with_capacity(1 + analysis.word_frequency.len() + analysis.entity_count());

    rows.push(ReportRow {
        metric: "Total Results".to_owned(),
        value: ReportValue::Count(analysis.total_results),
    });

    for word in &analysis.word_frequency {
        rows.push(ReportRow {
            metric: format!("Word Frequency: {}", word.term),
            value: ReportValue::Count(word.count),
        });
    }

    for group in &analysis.entity_analysis {
        for entity in &group.entities {
            rows.push(ReportRow {
                metric: format!("Entity ({})", group.entity_type),
                value: ReportValue::Text(format!("{} ({})", entity.term, entity.count)),
            });
        }
    }

    Report { rows }
}

/// Render `report` as CSV with a `Metric,Value` header.
///
/// # Errors
///
/// Returns [`QueryLensError::Report`] if the CSV writer fails.
pub fn to_csv(report: &Report) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(Report::COLUMNS)
        .map_err(|e| QueryLensError::Report(e.to_string()))?;
    for row in &report.rows {
        writer
            .write_record([row.metric.as_str(), row.value.to_string().as_str()])
            .map_err(|e| QueryLensError::Report(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| QueryLensError::Report(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| QueryLensError::Report(e.to_string()))
}

/// [`to_csv`], falling back to the header line alone.
pub fn to_csv_or_empty(report: &Report) -> String {
    to_csv(report).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "CSV export failed, returning empty table");
        format!("{}\n", Report::COLUMNS.join(","))
    })
}

/// Download file name for the report of `query`: `search_analysis_<query>.csv`.
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`. Leading and trailing whitespace and dots are
/// dropped, an empty result becomes `query`, and the stem is capped at 100
/// characters.
pub fn export_filename(query: &str) -> String {
    let sanitized: String = query
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim_matches(|c: char| c.is_whitespace() || c == '.');
    let stem: String = if trimmed.is_empty() {
        "query".to_owned()
    } else {
        trimmed.chars().take(MAX_FILENAME_STEM_CHARS).collect()
    };

    format!("search_analysis_{stem}.csv")
}

//! Search-result analysis and report flattening.

pub mod analyzer;
pub mod counter;
pub mod report;
pub mod types;

pub use analyzer::Analyzer;
pub use report::{export_filename, generate_report, to_csv};
pub use types::{AnalysisRecord, EntityGroup, Report, ReportRow, ReportValue, TermCount};

//! QueryLens: search the web, analyse the result snippets, and browse the
//! analysis as tables and charts.
//!
//! A query flows one way through the pipeline:
//! query → search results → analysis record → (charts, report)
//!
//! # Architecture
//!
//! - **Search**: [`querylens_search::Fetcher`] scrapes DuckDuckGo's HTML
//!   endpoint and caches result lists for the process lifetime
//! - **Text**: [`text::TextProcessor`] tokenises, tags entities and builds
//!   extractive summaries
//! - **Analysis**: [`analysis::Analyzer`] aggregates snippets into word
//!   frequencies, ranked entities and a summary; [`analysis::report`]
//!   flattens the record into a `Metric`/`Value` table
//! - **Presenter**: Plotly charts and HTML pages served by axum

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod presenter;
pub mod text;

pub use analysis::{AnalysisRecord, Analyzer, Report};
pub use config::AppConfig;
pub use error::{QueryLensError, Result};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineOutput};
pub use text::TextProcessor;

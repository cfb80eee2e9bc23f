//! Browser UI server.

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use querylens_search::{DEFAULT_MAX_RESULTS, SearchProvider};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::page;
use crate::analysis::{export_filename, report::to_csv_or_empty};
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineOutcome};

struct ServerState<P> {
    pipeline: Arc<Pipeline<P>>,
}

impl<P> Clone for ServerState<P> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Build the router: `/`, `/search`, `/report.csv` and `/health`.
pub fn router<P>(pipeline: Arc<Pipeline<P>>) -> Router
where
    P: SearchProvider + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/search", get(search_page::<P>))
        .route("/report.csv", get(report_csv::<P>))
        .route("/health", get(health::<P>))
        .with_state(ServerState { pipeline })
}

/// Bind `addr` and serve the UI until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<P>(addr: &str, pipeline: Pipeline<P>) -> Result<()>
where
    P: SearchProvider + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, pipeline).await
}

/// Serve the UI on an already bound listener.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_listener<P>(listener: TcpListener, pipeline: Pipeline<P>) -> Result<()>
where
    P: SearchProvider + 'static,
{
    let local_addr = listener.local_addr()?;
    let app = router(Arc::new(pipeline));

    tracing::info!("querylens listening on http://{local_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(page::index_page())
}

async fn search_page<P: SearchProvider + 'static>(
    State(state): State<ServerState<P>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let outcome = state.pipeline.run(&params.q, params.max_results).await;
    Html(page::outcome_page(&params.q, params.max_results, &outcome))
}

async fn report_csv<P: SearchProvider + 'static>(
    State(state): State<ServerState<P>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let output = match state.pipeline.run(&params.q, params.max_results).await {
        PipelineOutcome::Complete(output) => output,
        PipelineOutcome::EmptyQuery => {
            return (StatusCode::BAD_REQUEST, page::EMPTY_QUERY_WARNING).into_response();
        }
        PipelineOutcome::NoResults { .. } => {
            return (StatusCode::NOT_FOUND, page::NO_RESULTS_ERROR).into_response();
        }
    };

    let body = to_csv_or_empty(&output.report);
    let disposition = match content_disposition(&export_filename(&output.query)) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "invalid export filename header");
            HeaderValue::from_static("attachment")
        }
    };

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

async fn health<P: SearchProvider + 'static>(
    State(state): State<ServerState<P>>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "provider": state.pipeline.fetcher().provider().name(),
        "cached_queries": state.pipeline.fetcher().cache().entry_count().await,
    }))
}

/// `attachment` disposition with an ASCII `filename` and, for non-ASCII
/// names, a UTF-8 `filename*`.
fn content_disposition(
    filename: &str,
) -> std::result::Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let value = if ascii == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        )
    };
    HeaderValue::from_str(&value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn ascii_disposition() {
        let value = content_disposition("search_analysis_rust programming.csv").expect("header");
        assert_eq!(
            value.to_str().expect("ascii"),
            "attachment; filename=\"search_analysis_rust programming.csv\""
        );
    }

    #[test]
    fn non_ascii_disposition_has_utf8_form() {
        let value = content_disposition("search_analysis_café.csv").expect("header");
        assert_eq!(
            value.to_str().expect("ascii"),
            "attachment; filename=\"search_analysis_caf_.csv\"; \
             filename*=UTF-8''search_analysis_caf%C3%A9.csv"
        );
    }

    #[test]
    fn default_bound() {
        let params: SearchParams = serde_json::from_str("{}").expect("params");
        assert_eq!(params.max_results, 10);
        assert!(params.q.is_empty());
    }
}

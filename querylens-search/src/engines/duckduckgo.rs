//! DuckDuckGo search backend. Scrapes the HTML endpoint, no API key.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::config::FetcherConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::types::SearchResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// DuckDuckGo HTML search scraper.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDuckGoEngine;

impl DuckDuckGoEngine {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it. Any other
    /// href is returned unchanged.
    fn extract_url(href: &str) -> String {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_owned()
        };

        let Ok(parsed) = Url::parse(&full_href) else {
            return href.to_owned();
        };

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_else(|| href.to_owned())
        } else {
            href.to_owned()
        }
    }
}

impl SearchProvider for DuckDuckGoEngine {
    async fn search(
        &self,
        client: &reqwest::Client,
        config: &FetcherConfig,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let response = client
            .get(&config.endpoint)
            .query(&[("q", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("DuckDuckGo request failed", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("DuckDuckGo response read failed", &e))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, max_results)
    }

    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }
}

/// Parse a DuckDuckGo HTML results page.
///
/// Only the first `max_results` result blocks are considered; blocks without
/// a title link or without a snippet are skipped, so fewer than
/// `max_results` results may come back even when the page has more.
pub fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.result:not(.result--ad)")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("a.result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();
    let mut skipped = 0usize;

    for element in document.select(&result_sel).take(max_results) {
        match parse_result_block(element, &title_sel, &snippet_sel) {
            Some(result) => results.push(result),
            None => skipped += 1,
        }
    }

    tracing::debug!(count = results.len(), skipped, "DuckDuckGo results parsed");
    Ok(results)
}

/// Extract one result, or `None` if the title, link or snippet is missing.
fn parse_result_block(
    element: ElementRef<'_>,
    title_sel: &Selector,
    snippet_sel: &Selector,
) -> Option<SearchResult> {
    let title_el = element.select(title_sel).next()?;

    let title = collapse_text(title_el);
    if title.is_empty() {
        return None;
    }

    let href = title_el.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }

    let snippet = element.select(snippet_sel).next().map(collapse_text)?;
    if snippet.is_empty() {
        return None;
    }

    Some(SearchResult {
        title,
        url: DuckDuckGoEngine::extract_url(href),
        snippet,
    })
}

/// Concatenate an element's text and collapse runs of whitespace.
fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

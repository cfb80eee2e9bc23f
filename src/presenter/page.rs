//! HTML rendering of the search form and pipeline outcomes.

use querylens_search::{DEFAULT_MAX_RESULTS, MAX_RESULTS, MIN_RESULTS};
use serde_json::Value;
use url::Url;

use super::charts;
use crate::pipeline::{PipelineOutcome, PipelineOutput};

/// Script tag loading plotly.js.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Shown for an empty or whitespace query.
pub const EMPTY_QUERY_WARNING: &str = "Please enter a search query.";

/// Shown when the search produced nothing.
pub const NO_RESULTS_ERROR: &str = "No results found. Please try a different search query.";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:1100px;margin:0 auto;padding:1rem 2rem;color:#222}\
form{display:flex;gap:1rem;align-items:center;flex-wrap:wrap;margin-bottom:1rem}\
input[type=text]{flex:1;min-width:16rem;padding:.4rem}\
nav a{margin-right:1rem}\
section{border-top:1px solid #ddd;padding-top:.5rem;margin-top:1rem}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.25rem .6rem;text-align:left}\
.warning{background:#fff4ce;padding:.6rem}.error{background:#fde7e9;padding:.6rem}\
.columns{display:flex;gap:2rem;flex-wrap:wrap}\
footer{text-align:center;color:#777;margin-top:2rem;border-top:1px solid #ddd;padding-top:.5rem}";

/// Escape `text` for use in HTML element content and quoted attributes.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// The landing page: the search form alone.
pub fn index_page() -> String {
    layout(&search_form("", DEFAULT_MAX_RESULTS))
}

/// The page for a submitted search.
pub fn outcome_page(query: &str, max_results: usize, outcome: &PipelineOutcome) -> String {
    let mut body = search_form(query, max_results);
    match outcome {
        PipelineOutcome::EmptyQuery => {
            body.push_str(&format!("<p class=\"warning\">{EMPTY_QUERY_WARNING}</p>"));
        }
        PipelineOutcome::NoResults { .. } => {
            body.push_str(&format!("<p class=\"error\">{NO_RESULTS_ERROR}</p>"));
        }
        PipelineOutcome::Complete(output) => body.push_str(&panels(output)),
    }
    layout(&body)
}

/// Relative URL of the CSV download for `query`.
pub fn report_href(query: &str, max_results: usize) -> String {
    format!(
        "/report.csv?q={}&max_results={max_results}",
        urlencoding::encode(query)
    )
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Search &amp; Analysis Tool</title>\n<style>{STYLE}</style>\n\
         <script src=\"{PLOTLY_CDN}\"></script>\n</head>\n<body>\n\
         <h1>Search &amp; Analysis Tool</h1>\n\
         <p>This tool helps you search, analyze, and visualize information from the web. \
         Enter a search query below to get started.</p>\n{body}\n\
         <footer>Built with Rust, axum and Plotly</footer>\n</body>\n</html>\n"
    )
}

fn search_form(query: &str, max_results: usize) -> String {
    format!(
        "<form action=\"/search\" method=\"get\">\n\
         <label>Enter your search query: <input type=\"text\" name=\"q\" value=\"{query}\"></label>\n\
         <label>Maximum number of results: <output id=\"max-out\">{max}</output>\n\
         <input type=\"range\" name=\"max_results\" min=\"{MIN_RESULTS}\" max=\"{MAX_RESULTS}\" \
         value=\"{max}\" oninput=\"document.getElementById('max-out').value=this.value\"></label>\n\
         <button type=\"submit\">Search and Analyze</button>\n</form>\n",
        query = html_escape(query),
        max = max_results.clamp(MIN_RESULTS, MAX_RESULTS),
    )
}

fn panels(output: &PipelineOutput) -> String {
    let mut html = String::from(
        "<nav><a href=\"#results\">Search Results</a><a href=\"#analysis\">Analysis</a>\
         <a href=\"#visualizations\">Visualizations</a><a href=\"#report\">Report</a></nav>\n",
    );
    html.push_str(&results_panel(output));
    html.push_str(&analysis_panel(output));
    html.push_str(&visualizations_panel(output));
    html.push_str(&report_panel(output));
    html
}

fn results_panel(output: &PipelineOutput) -> String {
    let mut html = String::from("<section id=\"results\">\n<h2>Search Results</h2>\n");
    for (i, result) in output.results.iter().enumerate() {
        html.push_str(&format!(
            "<details>\n<summary>{n}. {title}</summary>\n<p>{snippet}</p>\n\
             <p>URL: {url}</p>\n</details>\n",
            n = i + 1,
            title = html_escape(&result.title),
            snippet = html_escape(&result.snippet),
            url = result_link(&result.url),
        ));
    }
    html.push_str("</section>\n");
    html
}

fn analysis_panel(output: &PipelineOutput) -> String {
    let analysis = &output.analysis;
    let mut html = String::from(
        "<section id=\"analysis\">\n<h2>Analysis</h2>\n<div class=\"columns\">\n\
         <div>\n<h3>Top Words</h3>\n<table>\n<tr><th>Word</th><th>Count</th></tr>\n",
    );
    for word in &analysis.word_frequency {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            html_escape(&word.term),
            word.count
        ));
    }
    html.push_str("</table>\n</div>\n<div>\n<h3>Named Entities</h3>\n");
    for group in &analysis.entity_analysis {
        html.push_str(&format!(
            "<h4>{}</h4>\n<table>\n<tr><th>Entity</th><th>Count</th></tr>\n",
            html_escape(&group.entity_type)
        ));
        for entity in &group.entities {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                html_escape(&entity.term),
                entity.count
            ));
        }
        html.push_str("</table>\n");
    }
    html.push_str(&format!(
        "</div>\n</div>\n<h3>Summary</h3>\n<p>{}</p>\n</section>\n",
        html_escape(&analysis.summary)
    ));
    html
}

fn visualizations_panel(output: &PipelineOutput) -> String {
    let figures = [
        ("chart-words", charts::word_frequency_bar(&output.analysis.word_frequency)),
        ("chart-entities", charts::entity_sunburst(&output.analysis.entity_analysis)),
        ("chart-results", charts::results_overview_scatter(&output.results)),
    ];

    let mut html = String::from("<section id=\"visualizations\">\n<h2>Visualizations</h2>\n");
    for (id, figure) in &figures {
        html.push_str(&format!("<div id=\"{id}\"></div>\n"));
        html.push_str(&format!(
            "<script>(function(f){{Plotly.newPlot('{id}',f.data,f.layout,{{responsive:true}});}})({});</script>\n",
            script_json(figure)
        ));
    }
    html.push_str("</section>\n");
    html
}

fn report_panel(output: &PipelineOutput) -> String {
    let mut html = String::from(
        "<section id=\"report\">\n<h2>Analysis Report</h2>\n<table>\n\
         <tr><th>Metric</th><th>Value</th></tr>\n",
    );
    for row in &output.report.rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            html_escape(&row.metric),
            html_escape(&row.value.to_string())
        ));
    }
    html.push_str(&format!(
        "</table>\n<p><a href=\"{}\" download=\"{}\">Download Report as CSV</a></p>\n</section>\n",
        html_escape(&report_href(&output.query, output.max_results)),
        html_escape(&crate::analysis::export_filename(&output.query)),
    ));
    html
}

/// A link to `url` if it is an absolute `http`/`https` URL, otherwise the
/// escaped text alone.
fn result_link(url: &str) -> String {
    let escaped = html_escape(url);
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            format!("<a href=\"{escaped}\">{escaped}</a>")
        }
        _ => escaped,
    }
}

/// Serialise a figure for inlining in a `<script>` element.
///
/// `<`, `>` and `&` become JSON unicode escapes, so no markup survives into
/// the script body.
fn script_json(figure: &Value) -> String {
    let json = figure.to_string();
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            c => escaped.push(c),
        }
    }
    escaped
}

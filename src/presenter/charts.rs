//! Plotly figure builders.
//!
//! Each builder returns a figure as Plotly JSON (`{"data": [...], "layout":
//! {...}}`), rendered in the browser by plotly.js. Inputs with nothing to draw
//! produce a [`placeholder`] figure carrying a message instead.

use querylens_search::SearchResult;
use serde_json::{Value, json};

use crate::analysis::{EntityGroup, TermCount};

const TITLE_LABEL_CHARS: usize = 30;

/// An empty figure showing `message` in the middle.
pub fn placeholder(message: &str) -> Value {
    json!({
        "data": [],
        "layout": {
            "height": 400,
            "xaxis": { "visible": false },
            "yaxis": { "visible": false },
            "annotations": [{
                "text": message,
                "xref": "paper",
                "yref": "paper",
                "x": 0.5,
                "y": 0.5,
                "showarrow": false,
                "font": { "size": 14 }
            }]
        }
    })
}

/// Bar chart of word counts, in the given order.
pub fn word_frequency_bar(word_frequency: &[TermCount]) -> Value {
    if word_frequency.is_empty() {
        return placeholder("No word frequency data available");
    }

    let words: Vec<&str> = word_frequency.iter().map(|w| w.term.as_str()).collect();
    let counts: Vec<usize> = word_frequency.iter().map(|w| w.count).collect();

    json!({
        "data": [{
            "type": "bar",
            "x": words,
            "y": counts
        }],
        "layout": {
            "title": { "text": "Word Frequency Distribution" },
            "template": "plotly_white",
            "xaxis": { "title": { "text": "Words" }, "tickangle": -45 },
            "yaxis": { "title": { "text": "Frequency" } },
            "showlegend": false,
            "height": 400
        }
    })
}

/// Two-level sunburst: entity types at the root ring, their entities
/// outside. A type's value is the sum of its entities' counts.
pub fn entity_sunburst(entity_analysis: &[EntityGroup]) -> Value {
    if entity_analysis.is_empty() {
        return placeholder("No entity data available");
    }
    if entity_analysis.iter().all(|g| g.entities.is_empty()) {
        return placeholder("No entities found in the analysis");
    }

    let mut ids = Vec::new();
    let mut labels = Vec::new();
    let mut parents = Vec::new();
    let mut values = Vec::new();

    for group in entity_analysis {
        ids.push(group.entity_type.clone());
        labels.push(group.entity_type.clone());
        parents.push(String::new());
        values.push(group.entities.iter().map(|e| e.count).sum::<usize>());

        for entity in &group.entities {
            // Entity text may equal a type label, so ids are qualified.
            ids.push(format!("{}/{}", group.entity_type, entity.term));
            labels.push(entity.term.clone());
            parents.push(group.entity_type.clone());
            values.push(entity.count);
        }
    }

    json!({
        "data": [{
            "type": "sunburst",
            "ids": ids,
            "labels": labels,
            "parents": parents,
            "values": values,
            "branchvalues": "total"
        }],
        "layout": {
            "title": { "text": "Named Entity Distribution" },
            "width": 600,
            "height": 600
        }
    })
}

/// Scatter of snippet length against result index, labelled by title.
pub fn results_overview_scatter(results: &[SearchResult]) -> Value {
    if results.is_empty() {
        return placeholder("No search results available");
    }

    let indices: Vec<usize> = (0..results.len()).collect();
    let lengths: Vec<usize> = results.iter().map(|r| r.snippet.chars().count()).collect();
    let titles: Vec<String> = results.iter().map(|r| short_title(&r.title)).collect();

    json!({
        "data": [{
            "type": "scatter",
            "mode": "markers+text",
            "x": indices,
            "y": lengths,
            "text": titles,
            "textposition": "top center",
            "marker": { "size": 10 }
        }],
        "layout": {
            "title": { "text": "Search Results Overview" },
            "template": "plotly_white",
            "xaxis": { "title": { "text": "Result Index" } },
            "yaxis": { "title": { "text": "Snippet Length" } },
            "showlegend": false,
            "height": 400
        }
    })
}

fn short_title(title: &str) -> String {
    if title.chars().count() > TITLE_LABEL_CHARS {
        let mut short: String = title.chars().take(TITLE_LABEL_CHARS).collect();
        short.push_str("...");
        short
    } else {
        title.to_owned()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn annotation(figure: &Value) -> Option<&str> {
        figure["layout"]["annotations"][0]["text"].as_str()
    }

    #[test]
    fn placeholder_carries_message() {
        let figure = placeholder("nothing here");
        assert_eq!(annotation(&figure), Some("nothing here"));
        assert_eq!(figure["data"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn empty_inputs_give_placeholders() {
        assert_eq!(
            annotation(&word_frequency_bar(&[])),
            Some("No word frequency data available")
        );
        assert_eq!(annotation(&entity_sunburst(&[])), Some("No entity data available"));
        assert_eq!(
            annotation(&results_overview_scatter(&[])),
            Some("No search results available")
        );
    }

    #[test]
    fn sunburst_of_empty_groups() {
        let groups = vec![EntityGroup {
            entity_type: "ENTITY".into(),
            entities: Vec::new(),
        }];
        assert_eq!(
            annotation(&entity_sunburst(&groups)),
            Some("No entities found in the analysis")
        );
    }

    #[test]
    fn bar_keeps_word_order() {
        let figure = word_frequency_bar(&[TermCount::new("rust", 3), TermCount::new("fast", 1)]);
        assert_eq!(figure["data"][0]["x"], json!(["rust", "fast"]));
        assert_eq!(figure["data"][0]["y"], json!([3, 1]));
        assert!(annotation(&figure).is_none());
    }

    #[test]
    fn sunburst_sums_type_values() {
        let groups = vec![EntityGroup {
            entity_type: "ENTITY".into(),
            entities: vec![TermCount::new("Rust", 2), TermCount::new("ENTITY", 1)],
        }];
        let figure = entity_sunburst(&groups);
        let trace = &figure["data"][0];
        assert_eq!(trace["labels"], json!(["ENTITY", "Rust", "ENTITY"]));
        assert_eq!(trace["parents"], json!(["", "ENTITY", "ENTITY"]));
        assert_eq!(trace["values"], json!([3, 2, 1]));
        assert_eq!(trace["ids"], json!(["ENTITY", "ENTITY/Rust", "ENTITY/ENTITY"]));
    }

    #[test]
    fn scatter_truncates_long_titles() {
        let long = "A".repeat(31);
        let exact = "B".repeat(30);
        let results = vec![
            SearchResult::new(long, "https://a.com", "four"),
            SearchResult::new(exact.clone(), "https://b.com", "snippet!"),
        ];
        let figure = results_overview_scatter(&results);
        let trace = &figure["data"][0];
        assert_eq!(trace["text"][0], json!(format!("{}...", "A".repeat(30))));
        assert_eq!(trace["text"][1], json!(exact));
        assert_eq!(trace["x"], json!([0, 1]));
        assert_eq!(trace["y"], json!([4, 8]));
    }
}

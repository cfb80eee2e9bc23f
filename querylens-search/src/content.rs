//! HTML content extraction: drops script and style text, keeps the rest.
//!
//! The output is every visible text fragment of the document, trimmed and
//! joined with single spaces.

use scraper::{Html, Node};

/// Elements whose text content is never visible.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript"];

/// Extract the visible text of an HTML document.
///
/// Each text node outside `<script>`, `<style>` and `<noscript>` is trimmed;
/// empty fragments are dropped and the remainder joined with a single space.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let fragments: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect();

    fragments.join(" ")
}

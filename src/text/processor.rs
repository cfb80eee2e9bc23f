//! The text processor: tokens, entities and extractive summaries.
//!
//! Each operation has a `try_*` form that reports failure and a plain form
//! that never fails:
//!
//! | operation | fallback |
//! |---|---|
//! | [`TextProcessor::preprocess_text`] | whitespace split of the original text |
//! | [`TextProcessor::extract_entities`] | no entities |
//! | [`TextProcessor::get_summary`] | first 500 characters + `...` |

use serde::Serialize;
use std::collections::HashMap;

use super::lemmatize::lemmatize;
use super::stopwords::is_stopword;
use super::tokenize::{sentences, word_tokens};
use crate::config::TextConfig;
use crate::error::{QueryLensError, Result};

/// The only entity label the extractor assigns.
pub const ENTITY_LABEL: &str = "ENTITY";

/// A capitalised token tagged with an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// The token as it appears in the text.
    pub text: String,
    /// Entity type label; always [`ENTITY_LABEL`].
    pub kind: &'static str,
}

/// Tokenises, tags and summarises free text.
#[derive(Debug, Clone, Default)]
pub struct TextProcessor {
    config: TextConfig,
}

impl TextProcessor {
    /// Create a processor with the given limits.
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// The limits this processor applies.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    fn check_size(&self, text: &str) -> Result<()> {
        if text.len() > self.config.max_input_bytes {
            return Err(QueryLensError::Text(format!(
                "input of {} bytes exceeds the {} byte limit",
                text.len(),
                self.config.max_input_bytes
            )));
        }
        Ok(())
    }

    /// Lowercase, tokenise, drop stopwords and non-alphanumeric tokens, then
    /// lemmatise what is left.
    ///
    /// # Errors
    ///
    /// Returns [`QueryLensError::Text`] if the input exceeds `max_input_bytes`.
    pub fn try_preprocess_text(&self, text: &str) -> Result<Vec<String>> {
        self.check_size(text)?;
        let lower = text.to_lowercase();
        Ok(word_tokens(&lower)
            .into_iter()
            .filter(|token| !is_stopword(token) && is_alphanumeric(token))
            .map(lemmatize)
            .collect())
    }

    /// [`try_preprocess_text`](Self::try_preprocess_text), falling back to a
    /// plain whitespace split of the original, un-lowercased text.
    pub fn preprocess_text(&self, text: &str) -> Vec<String> {
        self.try_preprocess_text(text).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "preprocessing failed, using whitespace split");
            text.split_whitespace().map(str::to_owned).collect()
        })
    }

    /// Every token starting with an uppercase letter, in text order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryLensError::Text`] if the input exceeds `max_input_bytes`.
    pub fn try_extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        self.check_size(text)?;
        Ok(word_tokens(text)
            .into_iter()
            .filter(|token| token.chars().next().is_some_and(char::is_uppercase))
            .map(|token| Entity {
                text: token.to_owned(),
                kind: ENTITY_LABEL,
            })
            .collect())
    }

    /// [`try_extract_entities`](Self::try_extract_entities), falling back to
    /// an empty list.
    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        self.try_extract_entities(text).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "entity extraction failed");
            Vec::new()
        })
    }

    /// Pick the top sentences by `word_count / (1 + index)`.
    ///
    /// Sentences are emitted in descending score order, not text order; equal
    /// scores keep text order. A sentence that occurs more than once keeps its
    /// first position and its last score. Text without sentences yields the
    /// truncation fallback.
    ///
    /// # Errors
    ///
    /// Returns [`QueryLensError::Text`] if the input exceeds `max_input_bytes`.
    pub fn try_get_summary(&self, text: &str) -> Result<String> {
        self.check_size(text)?;

        let mut scored: Vec<(&str, f64)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (index, sentence) in sentences(text).into_iter().enumerate() {
            let words = word_tokens(&sentence.to_lowercase()).len();
            let score = words as f64 / (index + 1) as f64;
            match positions.get(sentence) {
                Some(&slot) => scored[slot].1 = score,
                None => {
                    positions.insert(sentence, scored.len());
                    scored.push((sentence, score));
                }
            }
        }

        if scored.is_empty() {
            return Ok(self.truncated(text));
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scored
            .into_iter()
            .take(self.config.summary_sentences)
            .map(|(sentence, _)| sentence)
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// [`try_get_summary`](Self::try_get_summary), falling back to the first
    /// `fallback_summary_chars` characters followed by `...`.
    pub fn get_summary(&self, text: &str) -> String {
        self.try_get_summary(text).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "summarisation failed, truncating input");
            self.truncated(text)
        })
    }

    fn truncated(&self, text: &str) -> String {
        let mut head: String = text.chars().take(self.config.fallback_summary_chars).collect();
        head.push_str("...");
        head
    }
}

fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

//! Text processing: tokenisation, stopwords, lemmatisation, entities, summaries.

pub mod lemmatize;
pub mod processor;
pub mod stopwords;
pub mod tokenize;

pub use processor::{ENTITY_LABEL, Entity, TextProcessor};

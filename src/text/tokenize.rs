//! Word and sentence segmentation.
//!
//! Built on Unicode text segmentation (UAX #29). Word tokens keep
//! punctuation as separate tokens and split English clitics the way
//! Treebank-style tokenisers do: `Rust's` becomes `Rust` + `'s`,
//! `don't` becomes `do` + `n't`.

use unicode_segmentation::UnicodeSegmentation;

const CLITICS: &[&str] = &["n't", "n’t", "'s", "’s", "'S", "’S", "N'T", "N’T"];

/// Split `text` into word and punctuation tokens, dropping whitespace.
pub fn word_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for segment in text.split_word_bounds() {
        if segment.trim().is_empty() {
            continue;
        }
        match split_clitic(segment) {
            Some((stem, clitic)) => {
                tokens.push(stem);
                tokens.push(clitic);
            }
            None => tokens.push(segment),
        }
    }
    tokens
}

/// Split `text` into trimmed sentences, dropping those with no letters or digits.
pub fn sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_clitic(token: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let stem = token.strip_suffix(clitic)?;
        (!stem.is_empty()).then(|| (stem, &token[stem.len()..]))
    })
}

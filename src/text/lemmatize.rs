//! Rule-based noun lemmatiser.
//!
//! Reduces regular English plurals to their singular form. Irregular
//! plurals come from a fixed table; words that merely end in `s` (`status`,
//! `analysis`, `class`, `news`) are left alone. Input must be lowercase.

const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "people"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("teeth", "tooth"),
    ("vertices", "vertex"),
    ("wives", "wife"),
    ("women", "woman"),
];

/// Words ending in `s` that are already singular.
const INVARIANT: &[&str] = &[
    "alias", "always", "atlas", "bias", "canvas", "chaos", "economics", "electronics", "ethics",
    "gas", "lens", "mathematics", "news", "perhaps", "physics", "politics", "series", "species",
    "thus", "towards", "whereas", "yes",
];

/// Return the singular (lemma) form of a lowercase noun.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*lemma).to_owned();
    }
    if word.chars().count() <= 3 || INVARIANT.contains(&word) {
        return word.to_owned();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
        return word.to_owned();
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if word.ends_with("shes") || word.ends_with("xes") || word.ends_with("zzes") {
        return strip_es(word);
    }
    if let Some(stem) = word.strip_suffix("ches") {
        // `beaches` → `beach`, but `caches` → `cache`.
        let single_vowel_before = stem
            .chars()
            .rev()
            .take(2)
            .filter(|c| is_vowel(*c))
            .count()
            == 1
            && stem.chars().last().is_some_and(is_vowel);
        if single_vowel_before {
            return strip_s(word);
        }
        return strip_es(word);
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_owned();
    }
    if word.ends_with('s') {
        return strip_s(word);
    }
    word.to_owned()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn strip_s(word: &str) -> String {
    word[..word.len() - 1].to_owned()
}

fn strip_es(word: &str) -> String {
    word[..word.len() - 2].to_owned()
}

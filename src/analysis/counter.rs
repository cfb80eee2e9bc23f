//! Frequency counting with first-seen tie-breaking.

use std::collections::HashMap;
use std::hash::Hash;

/// Count `items` and return the `n` most common, highest count first.
///
/// Items with equal counts keep the order in which they were first seen.
pub fn most_common<T, I>(items: I, n: usize) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn counts_and_orders_descending() {
        let top = most_common(["b", "a", "b", "c", "b", "a"], 10);
        assert_eq!(top, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let top = most_common(["z", "y", "x", "y", "z", "x"], 10);
        assert_eq!(top, vec![("z", 2), ("y", 2), ("x", 2)]);
    }

    #[test]
    fn truncates_to_n() {
        let words: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let top = most_common(words, 20);
        assert_eq!(top.len(), 20);
        assert_eq!(top[0].0, "w0");
        assert_eq!(top[19].0, "w19");
    }

    #[test]
    fn empty_input() {
        let top: Vec<(&str, usize)> = most_common(Vec::<&str>::new(), 5);
        assert!(top.is_empty());
    }

    #[test]
    fn zero_n_returns_nothing() {
        assert!(most_common(["a", "a"], 0).is_empty());
    }
}

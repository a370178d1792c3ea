//! Fuzzy name matching for batch catalog checks.
//!
//! App names arrive from pasted lists with inconsistent casing, spacing and
//! suffixes, so exact lookups miss too much. Sørensen–Dice similarity over
//! character bigrams is tolerant of those variations and cheap enough to run
//! per candidate row.

use std::collections::HashMap;

/// Similarity of two strings in [0.0, 1.0], 1.0 meaning equal.
///
/// Comparison is case-insensitive. Strings shorter than two characters have
/// no bigrams; they only match exactly.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.chars().count() < 2 || b.chars().count() < 2 {
        return 0.0;
    }

    let bigrams_a = bigrams(&a);
    let bigrams_b = bigrams(&b);

    let total: usize = bigrams_a.values().sum::<usize>() + bigrams_b.values().sum::<usize>();
    let mut shared = 0usize;

    for (bigram, count_a) in &bigrams_a {
        if let Some(count_b) = bigrams_b.get(bigram) {
            shared += count_a.min(count_b);
        }
    }

    (2 * shared) as f64 / total as f64
}

fn bigrams(s: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = s.chars().collect();
    let mut map = HashMap::new();

    for pair in chars.windows(2) {
        *map.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    map
}

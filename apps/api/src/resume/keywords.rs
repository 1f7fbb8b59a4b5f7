//! Keyword tokenizer shared by the résumé parser and the match scorer.
//!
//! Rules: lowercase, every character outside `[a-z0-9+.# ]` becomes a space,
//! split on whitespace, drop tokens of two characters or fewer and stop words.

use std::collections::{HashMap, HashSet};

use crate::lookup::LookupTables;

/// Maximum number of keywords kept on a parsed résumé.
pub const MAX_RESUME_KEYWORDS: usize = 40;

/// Lowercases `text` and blanks out everything the tokenizer ignores.
/// Non-ASCII characters become single spaces after lowercasing, so the
/// output can be longer than the input when lowercasing expands a character.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '#' | ' ')
            {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Iterates the keyword tokens of an already-normalized string.
pub fn tokens<'a>(
    normalized: &'a str,
    tables: &'a LookupTables,
) -> impl Iterator<Item = &'a str> + 'a {
    normalized
        .split_whitespace()
        .filter(move |token| token.len() > 2 && !tables.is_stop_word(token))
}

/// Counts tokens and returns them by descending frequency.
/// `sort_by` is stable, so equal counts keep first-seen order.
pub fn rank_keywords(text: &str, tables: &LookupTables, cap: usize) -> Vec<String> {
    let normalized = normalize(text);

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in tokens(&normalized, tables) {
        match positions.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(cap)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Unique token set of a listing text.
pub fn token_set(text: &str, tables: &LookupTables) -> HashSet<String> {
    let normalized = normalize(text);
    tokens(&normalized, tables).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_code_punctuation() {
        assert_eq!(normalize("C++, C# & Node.js!"), "c++  c#   node.js ");
    }

    #[test]
    fn test_normalize_blanks_non_ascii() {
        assert_eq!(normalize("Café"), "caf ");
    }

    #[test]
    fn test_normalize_can_grow_on_expanding_lowercase() {
        assert_eq!(normalize("İ"), "i ");
    }

    #[test]
    fn test_rank_keywords_orders_by_frequency_then_first_seen() {
        let tables = LookupTables::new();
        let ranked = rank_keywords("rust go rust python go rust kafka", &tables, 40);
        // "go" is two characters and dropped
        assert_eq!(ranked, vec!["rust", "python", "kafka"]);
    }

    #[test]
    fn test_rank_keywords_ties_preserve_insertion_order() {
        let tables = LookupTables::new();
        let ranked = rank_keywords("docker kubernetes terraform", &tables, 40);
        assert_eq!(ranked, vec!["docker", "kubernetes", "terraform"]);
    }

    #[test]
    fn test_rank_keywords_drops_stop_words_and_short_tokens() {
        let tables = LookupTables::new();
        let ranked = rank_keywords("The experience with AWS and an API", &tables, 40);
        assert_eq!(ranked, vec!["aws", "api"]);
    }

    #[test]
    fn test_rank_keywords_respects_cap() {
        let tables = LookupTables::new();
        let text = (0..60).map(|i| format!("tok{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(rank_keywords(&text, &tables, MAX_RESUME_KEYWORDS).len(), 40);
    }

    #[test]
    fn test_rank_keywords_never_duplicates() {
        let tables = LookupTables::new();
        let ranked = rank_keywords("React react REACT typescript React", &tables, 40);
        assert_eq!(ranked, vec!["react", "typescript"]);
    }

    #[test]
    fn test_token_set_is_unique() {
        let tables = LookupTables::new();
        let set = token_set("Seeking a React and Node engineer. React!", &tables);
        assert!(set.contains("react"));
        assert!(set.contains("node"));
        assert!(set.contains("engineer."));
        assert!(!set.contains("and"));
        assert_eq!(set.len(), 4);
    }
}

//! Read-only lookup tables shared by every agent run.
//!
//! Built once at startup and carried in `AppState` as `Arc<LookupTables>`;
//! components receive them explicitly rather than reaching for globals.

use std::collections::{HashMap, HashSet};

use crate::harvest::models::WorkplaceFilter;

/// Tokens never counted as résumé or listing keywords.
const STOP_WORDS: &[&str] = &[
    "the",
    "and",
    "for",
    "with",
    "that",
    "from",
    "this",
    "have",
    "your",
    "will",
    "about",
    "into",
    "able",
    "such",
    "over",
    "other",
    "their",
    "they",
    "them",
    "using",
    "skills",
    "experience",
    "professional",
    "summary",
    "work",
    "education",
    "company",
    "role",
    "responsible",
    "duties",
    "projects",
];

/// Job board `f_WT` codes.
const WORKPLACE_CODES: &[(WorkplaceFilter, &str)] = &[
    (WorkplaceFilter::Onsite, "1"),
    (WorkplaceFilter::Remote, "2"),
    (WorkplaceFilter::Hybrid, "3"),
];

/// Job board `f_E` codes, keyed by lowercase experience tag.
const EXPERIENCE_CODES: &[(&str, &str)] = &[
    ("internship", "1"),
    ("entry", "2"),
    ("associate", "3"),
    ("mid", "4"),
    ("senior", "5"),
    ("director", "6"),
    ("executive", "7"),
];

#[derive(Debug, Clone)]
pub struct LookupTables {
    stop_words: HashSet<&'static str>,
    workplace_codes: HashMap<WorkplaceFilter, &'static str>,
    experience_codes: HashMap<&'static str, &'static str>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            workplace_codes: WORKPLACE_CODES.iter().copied().collect(),
            experience_codes: EXPERIENCE_CODES.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// `None` for `Any`: the search carries no workplace filter at all.
    pub fn workplace_code(&self, filter: WorkplaceFilter) -> Option<&'static str> {
        self.workplace_codes.get(&filter).copied()
    }

    /// Maps experience tags to board codes in input order.
    /// Unknown tags are dropped silently, repeated codes are kept once.
    pub fn experience_codes<S: AsRef<str>>(&self, levels: &[S]) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = Vec::new();
        for level in levels {
            let tag = level.as_ref().trim().to_lowercase();
            if let Some(code) = self.experience_codes.get(tag.as_str()) {
                if !codes.contains(code) {
                    codes.push(code);
                }
            }
        }
        codes
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_are_lowercase_lookups() {
        let tables = LookupTables::new();
        assert!(tables.is_stop_word("experience"));
        assert!(tables.is_stop_word("the"));
        assert!(!tables.is_stop_word("rust"));
    }

    #[test]
    fn test_workplace_codes() {
        let tables = LookupTables::new();
        assert_eq!(tables.workplace_code(WorkplaceFilter::Remote), Some("2"));
        assert_eq!(tables.workplace_code(WorkplaceFilter::Onsite), Some("1"));
        assert_eq!(tables.workplace_code(WorkplaceFilter::Hybrid), Some("3"));
        assert_eq!(tables.workplace_code(WorkplaceFilter::Any), None);
    }

    #[test]
    fn test_experience_codes_drop_unknown_tags() {
        let tables = LookupTables::new();
        let codes = tables.experience_codes(&["Senior", "wizard", "entry"]);
        assert_eq!(codes, vec!["5", "2"]);
    }

    #[test]
    fn test_experience_codes_dedupe() {
        let tables = LookupTables::new();
        let codes = tables.experience_codes(&["mid", " MID "]);
        assert_eq!(codes, vec!["4"]);
    }

    #[test]
    fn test_experience_codes_empty_input() {
        let tables = LookupTables::new();
        let empty: [&str; 0] = [];
        assert!(tables.experience_codes(&empty).is_empty());
    }
}

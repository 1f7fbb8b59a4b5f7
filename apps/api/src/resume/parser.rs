//! Résumé Parser: best-effort heuristics over plain text.
//!
//! Never fails: anything it cannot find is left unset or empty. The patterns
//! are tuned for single-column, English, header-per-line résumés.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lookup::LookupTables;
use crate::resume::keywords::{rank_keywords, MAX_RESUME_KEYWORDS};
use crate::resume::models::{ContactInfo, ParsedResume};

const MAX_LINKS: usize = 10;
const MAX_HIGHLIGHTS: usize = 10;
const MIN_HIGHLIGHT_CHARS: usize = 4;
const BULLET_MARKERS: &[char] = &['-', '•', '*'];
const SUMMARY_SENTENCES: usize = 3;
const MIN_SUMMARY_WORDS: usize = 5;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").expect("email pattern")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+[0-9]{1,3}[-. ]?)?\(?[0-9]{2,4}\)?[-. ]?[0-9]{3,4}[-. ]?[0-9]{3,4}")
        .expect("phone pattern")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(https?://|www\.)\S+").expect("url pattern"));

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z' -]+$").expect("name pattern"));

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?: [A-Z][a-z]+)*),?\s?(?:[A-Z]{2}|[A-Z][a-z]+)\b")
        .expect("location pattern")
});

/// One or two capitalized qualifiers before a section word: "Work Experience",
/// "TECHNICAL SKILLS", "Key Projects:".
static QUALIFIED_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z][A-Za-z&]*\s+){1,2}([A-Z][A-Za-z]*)\s*:?$").expect("header pattern")
});

/// Headers that open or close a résumé section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionHeader {
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

const SECTION_PREFIXES: &[(&str, SectionHeader)] = &[
    ("experience", SectionHeader::Experience),
    ("education", SectionHeader::Education),
    ("skills", SectionHeader::Skills),
    ("projects", SectionHeader::Projects),
    ("certifications", SectionHeader::Certifications),
];

/// Parses plain résumé text into a `ParsedResume`.
pub fn parse_resume(text: &str, tables: &LookupTables) -> ParsedResume {
    let text = text.replace("\r\n", "\n");

    let experience_highlights =
        extract_highlights(&section_lines(&text, SectionHeader::Experience));
    let education_highlights =
        extract_highlights(&section_lines(&text, SectionHeader::Education));
    let keywords = rank_keywords(&text, tables, MAX_RESUME_KEYWORDS);
    let summary = summarize(&text);
    let contact = extract_contact(&text);

    ParsedResume {
        raw_text: text,
        summary,
        keywords,
        experience_highlights,
        education_highlights,
        contact,
    }
}

fn extract_contact(text: &str) -> ContactInfo {
    let name = text
        .lines()
        .map(str::trim)
        .find(|line| is_name_candidate(line))
        .map(str::to_string);

    ContactInfo {
        name,
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().to_string()),
        location: LOCATION_RE.find(text).map(|m| m.as_str().to_string()),
        links: URL_RE
            .find_iter(text)
            .take(MAX_LINKS)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

fn is_name_candidate(line: &str) -> bool {
    NAME_RE.is_match(line)
        && line.split(' ').count() <= 4
        && line.chars().count() >= 5
        && !line.to_lowercase().contains("resume")
}

/// Recognizes a header line: a known word at the start of the line, optionally
/// "professional experience", not followed by more letters ("Experienced …").
/// Short title-cased lines ending in a known word also count.
fn classify_header(line: &str) -> Option<SectionHeader> {
    let line = line.trim();
    leading_header(line).or_else(|| qualified_header(line))
}

fn leading_header(line: &str) -> Option<SectionHeader> {
    let lower = line.to_lowercase();
    let lower = match lower.strip_prefix("professional") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start().to_string(),
        _ => lower,
    };

    SECTION_PREFIXES.iter().find_map(|(prefix, header)| {
        let rest = lower.strip_prefix(*prefix)?;
        match rest.chars().next() {
            Some(c) if c.is_alphabetic() => None,
            _ => Some(*header),
        }
    })
}

fn qualified_header(line: &str) -> Option<SectionHeader> {
    let word = QUALIFIED_HEADER_RE.captures(line)?.get(1)?.as_str().to_lowercase();
    SECTION_PREFIXES
        .iter()
        .find(|(prefix, _)| *prefix == word)
        .map(|(_, header)| *header)
}

/// Lines between the first `wanted` header and the next different header.
fn section_lines(text: &str, wanted: SectionHeader) -> Vec<&str> {
    let mut lines = text.lines();

    if !lines
        .by_ref()
        .any(|line| classify_header(line) == Some(wanted))
    {
        return Vec::new();
    }

    lines
        .take_while(|line| match classify_header(line) {
            Some(header) => header == wanted,
            None => true,
        })
        .collect()
}

fn extract_highlights(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_bullet(line))
        .filter(|line| line.chars().count() >= MIN_HIGHLIGHT_CHARS)
        .take(MAX_HIGHLIGHTS)
        .map(str::to_string)
        .collect()
}

/// Removes one leading bullet marker and the whitespace around it.
pub(crate) fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(BULLET_MARKERS).unwrap_or(line).trim()
}

fn summarize(text: &str) -> String {
    text.split(|c| c == '\n' || c == '.')
        .map(str::trim)
        .filter(|sentence| sentence.split_whitespace().count() >= MIN_SUMMARY_WORDS)
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Jane Marie Doe
jane.doe@example.com | +1 415-555-0199
https://github.com/janedoe www.janedoe.dev

Summary
Backend engineer building reliable distributed systems in Rust and Go.
Led migrations of legacy services to event driven architecture

Professional Experience
- Built a Rust ingestion pipeline processing 2M events per day.
• Reduced p99 latency by 40% across payment services
* Mentored four engineers
ok

Education
BSc Computer Science, State University
Dean's list

Skills
Rust, Go, Kafka, PostgreSQL, Kubernetes
";

    #[test]
    fn test_parse_is_deterministic() {
        let tables = LookupTables::new();
        let a = parse_resume(SAMPLE_RESUME, &tables);
        let b = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(a, b);
    }

    #[test]
    fn test_contact_extraction() {
        let tables = LookupTables::new();
        let parsed = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(parsed.contact.name.as_deref(), Some("Jane Marie Doe"));
        assert_eq!(parsed.contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(parsed.contact.phone.as_deref(), Some("+1 415-555-0199"));
        assert_eq!(
            parsed.contact.links,
            vec!["https://github.com/janedoe", "www.janedoe.dev"]
        );
        assert_eq!(parsed.contact.first_name(), Some("Jane"));
    }

    #[test]
    fn test_name_candidate_rules() {
        assert!(is_name_candidate("Jane Doe"));
        assert!(!is_name_candidate("Jane Resume Doe"));
        assert!(!is_name_candidate("Bo"));
        assert!(!is_name_candidate("One Two Three Four Five"));
        assert!(!is_name_candidate("jane doe"));
    }

    #[test]
    fn test_location_candidate() {
        let tables = LookupTables::new();
        let parsed = parse_resume("based in Austin, TX since 2019", &tables);
        assert_eq!(parsed.contact.location.as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn test_links_capped_at_ten() {
        let tables = LookupTables::new();
        let text = (0..15)
            .map(|i| format!("https://example.com/{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed = parse_resume(&text, &tables);
        assert_eq!(parsed.contact.links.len(), 10);
        assert_eq!(parsed.contact.links[0], "https://example.com/0");
    }

    #[test]
    fn test_experience_section_stops_at_education() {
        let tables = LookupTables::new();
        let parsed = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(
            parsed.experience_highlights,
            vec![
                "Built a Rust ingestion pipeline processing 2M events per day.",
                "Reduced p99 latency by 40% across payment services",
                "Mentored four engineers",
            ]
        );
    }

    #[test]
    fn test_education_section_stops_at_skills() {
        let tables = LookupTables::new();
        let parsed = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(
            parsed.education_highlights,
            vec!["BSc Computer Science, State University", "Dean's list"]
        );
    }

    #[test]
    fn test_missing_sections_yield_empty_highlights() {
        let tables = LookupTables::new();
        let parsed = parse_resume("Jane Doe\nSkills\nRust", &tables);
        assert!(parsed.experience_highlights.is_empty());
        assert!(parsed.education_highlights.is_empty());
    }

    #[test]
    fn test_highlights_capped_at_ten() {
        let tables = LookupTables::new();
        let mut text = String::from("Experience\n");
        for i in 0..14 {
            text.push_str(&format!("- Shipped feature number {i}\n"));
        }
        let parsed = parse_resume(&text, &tables);
        assert_eq!(parsed.experience_highlights.len(), 10);
        assert_eq!(parsed.experience_highlights[0], "Shipped feature number 0");
    }

    #[test]
    fn test_experienced_prose_is_not_a_header() {
        assert_eq!(classify_header("Experienced engineer"), None);
        assert_eq!(
            classify_header("PROFESSIONAL EXPERIENCE"),
            Some(SectionHeader::Experience)
        );
        assert_eq!(classify_header("Skills: Rust, Go"), Some(SectionHeader::Skills));
    }

    #[test]
    fn test_qualified_headers() {
        assert_eq!(classify_header("Work Experience"), Some(SectionHeader::Experience));
        assert_eq!(classify_header("TECHNICAL SKILLS"), Some(SectionHeader::Skills));
        assert_eq!(classify_header("Key Projects:"), Some(SectionHeader::Projects));
        assert_eq!(classify_header("Strong communication skills"), None);
        assert_eq!(classify_header("Jane Doe"), None);
    }

    #[test]
    fn test_work_experience_header_opens_section() {
        let tables = LookupTables::new();
        let parsed = parse_resume(
            "Jane Doe\nWork Experience\n- Built billing pipeline in Rust\nEducation\nBSc Physics",
            &tables,
        );
        assert_eq!(parsed.experience_highlights, vec!["Built billing pipeline in Rust"]);
        assert_eq!(parsed.education_highlights, vec!["BSc Physics"]);
    }

    #[test]
    fn test_technical_skills_header_closes_experience() {
        let tables = LookupTables::new();
        let parsed = parse_resume(
            "Experience\n- Built billing pipeline in Rust\nTechnical Skills\nRust, Go, Kafka\nPostgres, Redis",
            &tables,
        );
        assert_eq!(parsed.experience_highlights, vec!["Built billing pipeline in Rust"]);
    }

    #[test]
    fn test_summary_takes_first_three_long_sentences() {
        let tables = LookupTables::new();
        let parsed = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(
            parsed.summary,
            "Backend engineer building reliable distributed systems in Rust and Go. \
             Led migrations of legacy services to event driven architecture. \
             - Built a Rust ingestion pipeline processing 2M events per day"
        );
    }

    #[test]
    fn test_keywords_unique_and_ranked() {
        let tables = LookupTables::new();
        let parsed = parse_resume(SAMPLE_RESUME, &tables);
        assert_eq!(parsed.keywords[0], "rust");
        let mut seen = std::collections::HashSet::new();
        assert!(parsed.keywords.iter().all(|k| seen.insert(k.clone())));
        assert!(parsed.keywords.len() <= 40);
    }

    #[test]
    fn test_empty_text_parses_to_empty_resume() {
        let tables = LookupTables::new();
        let parsed = parse_resume("", &tables);
        assert!(parsed.keywords.is_empty());
        assert!(parsed.summary.is_empty());
        assert_eq!(parsed.contact, ContactInfo::default());
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("  - item "), "item");
        assert_eq!(strip_bullet("• item"), "item");
        assert_eq!(strip_bullet("plain"), "plain");
    }
}

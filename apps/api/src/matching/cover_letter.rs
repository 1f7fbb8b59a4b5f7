//! Short tailored note for one listing.

use crate::harvest::models::JobPosting;
use crate::resume::models::ParsedResume;
use crate::resume::parser::strip_bullet;

const STRENGTH_KEYWORDS: usize = 4;
const HIGHLIGHT_LINES: usize = 2;

/// Joins the non-blank segments with blank lines:
/// greeting, intro, strengths, highlights, closing.
pub fn compose_cover_letter(resume: &ParsedResume, posting: &JobPosting) -> String {
    let company = if posting.company.is_empty() {
        "there"
    } else {
        posting.company.as_str()
    };
    let greeting = format!("Hi {company},");

    let intro = format!(
        "{} here — an applicant for the {} role.",
        resume.contact.first_name().unwrap_or("Hello"),
        posting.title
    );

    let top_keywords: Vec<&str> = resume
        .keywords
        .iter()
        .take(STRENGTH_KEYWORDS)
        .map(String::as_str)
        .collect();
    let strengths = if top_keywords.is_empty() {
        String::new()
    } else {
        format!(
            "I bring hands-on strength in {} that map tightly to the scope outlined.",
            top_keywords.join(", ")
        )
    };

    let highlight_lines: Vec<String> = resume
        .experience_highlights
        .iter()
        .take(HIGHLIGHT_LINES)
        .enumerate()
        .map(|(idx, line)| format!("{}. {}", idx + 1, strip_bullet(line).trim()))
        .collect();
    let highlights = if highlight_lines.is_empty() {
        String::new()
    } else {
        format!("Recent highlights:\n{}", highlight_lines.join("\n"))
    };

    let mut closing: Vec<String> = Vec::new();
    if let Some(workplace) = posting.workplace_type.as_deref().filter(|w| !w.is_empty()) {
        closing.push(format!(
            "Comfortable with the {} setup.",
            workplace.to_lowercase()
        ));
    }
    closing.push("Ready to move quickly on next steps.".to_string());
    closing.push("Thanks for the consideration!".to_string());

    [greeting, intro, strengths, highlights, closing.join(" ")]
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::ContactInfo;

    fn resume() -> ParsedResume {
        ParsedResume {
            keywords: ["rust", "kafka", "postgres", "grpc", "docker"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            experience_highlights: vec![
                "- Built a Rust ingestion pipeline".to_string(),
                "Led the Kafka migration".to_string(),
                "Mentored four engineers".to_string(),
            ],
            contact: ContactInfo {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn posting() -> JobPosting {
        JobPosting {
            title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            workplace_type: Some("Remote".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_letter() {
        let letter = compose_cover_letter(&resume(), &posting());
        assert_eq!(
            letter,
            "Hi Acme,\n\n\
             Jane here — an applicant for the Platform Engineer role.\n\n\
             I bring hands-on strength in rust, kafka, postgres, grpc that map tightly to the scope outlined.\n\n\
             Recent highlights:\n1. Built a Rust ingestion pipeline\n2. Led the Kafka migration\n\n\
             Comfortable with the remote setup. Ready to move quickly on next steps. Thanks for the consideration!"
        );
    }

    #[test]
    fn test_highlights_block_omitted_without_experience() {
        let mut resume = resume();
        resume.experience_highlights.clear();
        let letter = compose_cover_letter(&resume, &posting());
        assert!(!letter.contains("Recent highlights"));
        assert!(!letter.contains("\n\n\n"));
    }

    #[test]
    fn test_sparse_inputs_use_defaults_and_drop_blank_segments() {
        let letter = compose_cover_letter(&ParsedResume::default(), &JobPosting::default());
        assert_eq!(
            letter,
            "Hi there,\n\n\
             Hello here — an applicant for the  role.\n\n\
             Ready to move quickly on next steps. Thanks for the consideration!"
        );
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workplace preference as submitted by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkplaceFilter {
    Remote,
    Onsite,
    Hybrid,
    #[default]
    Any,
}

impl FromStr for WorkplaceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "onsite" | "on-site" => Ok(Self::Onsite),
            "hybrid" => Ok(Self::Hybrid),
            "any" | "" => Ok(Self::Any),
            other => Err(format!("unknown workplace preference '{other}'")),
        }
    }
}

/// Search parameters for one harvest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub keywords: String,
    pub location: Option<String>,
    #[serde(default)]
    pub workplace_filter: WorkplaceFilter,
    #[serde(default)]
    pub experience_levels: Vec<String>,
}

/// One job listing. Created as a stub by the harvester; `description` and
/// `metadata` are filled once by the detail fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub listed_at: Option<String>,
    /// Absolute, query-stripped.
    pub url: String,
    pub workplace_type: Option<String>,
    /// Empty when unknown, never absent.
    pub description: String,
    pub metadata: BTreeMap<String, String>,
}

/// Data added to a stub by the detail fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    pub description: String,
    pub metadata: BTreeMap<String, String>,
}

impl JobPosting {
    pub fn apply_detail(&mut self, detail: JobDetail) {
        self.description = detail.description;
        self.metadata = detail.metadata;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workplace_filter_parse() {
        assert_eq!("Remote".parse::<WorkplaceFilter>(), Ok(WorkplaceFilter::Remote));
        assert_eq!("on-site".parse::<WorkplaceFilter>(), Ok(WorkplaceFilter::Onsite));
        assert_eq!("".parse::<WorkplaceFilter>(), Ok(WorkplaceFilter::Any));
        assert!("moon".parse::<WorkplaceFilter>().is_err());
    }

    #[test]
    fn test_workplace_filter_serde_lowercase() {
        let json = serde_json::to_string(&WorkplaceFilter::Hybrid).unwrap();
        assert_eq!(json, r#""hybrid""#);
    }

    #[test]
    fn test_posting_serializes_camel_case() {
        let posting = JobPosting {
            job_id: "42".to_string(),
            listed_at: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["jobId"], "42");
        assert_eq!(value["listedAt"], "2024-05-01");
        assert_eq!(value["description"], "");
    }

    #[test]
    fn test_apply_detail_replaces_description_and_metadata() {
        let mut posting = JobPosting::default();
        let mut metadata = BTreeMap::new();
        metadata.insert("Seniority level".to_string(), "Mid-Senior level".to_string());
        posting.apply_detail(JobDetail {
            description: "Build things".to_string(),
            metadata: metadata.clone(),
        });
        assert_eq!(posting.description, "Build things");
        assert_eq!(posting.metadata, metadata);
    }
}

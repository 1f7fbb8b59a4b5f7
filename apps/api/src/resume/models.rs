use serde::{Deserialize, Serialize};

/// Contact block lifted from the top of a résumé. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// At most 10, in document order.
    pub links: Vec<String>,
}

impl ContactInfo {
    /// First whitespace-separated token of the name, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }
}

/// Structured view of one résumé. Built once per run, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub raw_text: String,
    pub summary: String,
    /// Unique, descending frequency, first-seen order on ties. At most 40.
    pub keywords: Vec<String>,
    pub experience_highlights: Vec<String>,
    pub education_highlights: Vec<String>,
    pub contact: ContactInfo,
}

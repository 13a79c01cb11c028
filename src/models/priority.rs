use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a work item; unknown labels are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    /// Trimmed and non-empty when built by [`Priority::parse`].
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
            Priority::Other(s) => s,
        }
    }

    /// Blank means `Medium`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "medium" => Priority::Medium,
            "low" => Priority::Low,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Other(s.trim().to_string()),
        }
    }
}

impl Priority {
    pub fn normalized(&self) -> Self {
        Priority::parse(self.as_str())
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse(&s)
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

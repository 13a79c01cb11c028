use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a work item.
///
/// Values loaded from old rows that match none of the known labels are kept
/// verbatim in `Other`, so they survive a load/sync cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
    /// Unrecognised label, trimmed and non-empty when built by [`Status::parse`].
    Other(String),
}

impl Status {
    /// Label written into the remote table.
    pub fn as_str(&self) -> &str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
            Status::Cancelled => "Cancelled",
            Status::Other(s) => s,
        }
    }

    /// Lenient parse: case, spaces, `_` and `-` are ignored.
    /// A blank cell means `NotStarted`.
    pub fn parse(s: &str) -> Self {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "" | "notstarted" | "todo" => Status::NotStarted,
            "inprogress" => Status::InProgress,
            "completed" | "done" => Status::Completed,
            "onhold" => Status::OnHold,
            "cancelled" | "canceled" => Status::Cancelled,
            _ => Status::Other(s.trim().to_string()),
        }
    }
}

impl Status {
    /// Re-parse the label so a hand-built `Other` matches what a row decodes to.
    pub fn normalized(&self) -> Self {
        Status::parse(self.as_str())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

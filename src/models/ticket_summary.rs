use crate::utils::time::now_rfc3339;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which ticket-export shape a summary was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceFormat {
    TicketList,
    GroupSummary,
    #[default]
    Unknown,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceFormat::TicketList => "ticket list",
            SourceFormat::GroupSummary => "group summary",
            SourceFormat::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Per-group numbers of a GroupSummary export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub values: BTreeMap<String, f64>,
}

/// Canonical ticket metrics, replaced wholesale on every import.
///
/// `completed + open <= total` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub total: u64,
    pub completed: u64,
    pub open: u64,
    pub pending: u64,
    #[serde(default)]
    pub client_resolved: Option<u64>,
    #[serde(default)]
    pub employee_resolved: Option<u64>,
    pub last_imported_at: String,
    #[serde(default)]
    pub source_format: SourceFormat,
    #[serde(default)]
    pub breakdown: Option<Vec<BreakdownEntry>>,
}

impl TicketSummary {
    /// All counters zero, format `Unknown`, stamped now.
    pub fn empty() -> Self {
        Self {
            total: 0,
            completed: 0,
            open: 0,
            pending: 0,
            client_resolved: None,
            employee_resolved: None,
            last_imported_at: now_rfc3339(),
            source_format: SourceFormat::Unknown,
            breakdown: None,
        }
    }
}

impl Default for TicketSummary {
    fn default() -> Self {
        Self::empty()
    }
}

use crate::utils::date::{format_date, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A start/due date cell.
///
/// Text that is not `YYYY-MM-DD` (hand-edited cells, older exports) is kept
/// verbatim in `Raw` so it is written back unchanged on the next sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellDate {
    Date(NaiveDate),
    Raw(String),
}

impl CellDate {
    /// A blank cell means "no date".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Some(match parse_date(s) {
            Some(d) => CellDate::Date(d),
            None => CellDate::Raw(s.to_string()),
        })
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CellDate::Date(d) => Some(*d),
            CellDate::Raw(_) => None,
        }
    }
}

impl From<NaiveDate> for CellDate {
    fn from(d: NaiveDate) -> Self {
        CellDate::Date(d)
    }
}

impl From<String> for CellDate {
    fn from(s: String) -> Self {
        match parse_date(&s) {
            Some(d) => CellDate::Date(d),
            None => CellDate::Raw(s),
        }
    }
}

impl From<CellDate> for String {
    fn from(d: CellDate) -> Self {
        d.to_string()
    }
}

impl fmt::Display for CellDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellDate::Date(d) => f.write_str(&format_date(d)),
            CellDate::Raw(s) => f.write_str(s),
        }
    }
}

/// Cell text for an optional date; `None` is an empty cell.
pub fn format_cell_date(d: &Option<CellDate>) -> String {
    d.as_ref().map(ToString::to_string).unwrap_or_default()
}

use super::{cell_date::CellDate, priority::Priority, status::Status};
use crate::utils::time::{hhmm, now_rfc3339};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A tracked profile, contract or project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<CellDate>,
    #[serde(default)]
    pub due_date: Option<CellDate>,
    /// Always within 0..=100; use [`WorkItem::set_progress`].
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    /// Refreshed on every sync write, not on local edits.
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub work_sessions: Vec<WorkSession>,
}

impl WorkItem {
    /// New item with a fresh id and both timestamps set to now.
    pub fn new(name: &str, owner: &str) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            owner: owner.trim().to_string(),
            status: Status::NotStarted,
            priority: Priority::Medium,
            start_date: None,
            due_date: None,
            progress: 0,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
            work_sessions: Vec::new(),
        }
    }

    pub fn set_progress(&mut self, value: i64) {
        self.progress = clamp_progress(value);
    }

    /// Clamp progress and canonicalise status and priority labels, so the
    /// item equals what its encoded row decodes back to.
    pub fn normalize(&mut self) {
        self.set_progress(self.progress as i64);
        self.status = self.status.normalized();
        self.priority = self.priority.normalized();
    }

    /// Empty notes are stored as `None`.
    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = non_empty(notes);
    }

    pub fn session(&self, session_id: &str) -> Option<&WorkSession> {
        self.work_sessions.iter().find(|s| s.id == session_id)
    }

    pub fn session_mut(&mut self, session_id: &str) -> Option<&mut WorkSession> {
        self.work_sessions.iter_mut().find(|s| s.id == session_id)
    }
}

/// A scheduled time block owned by a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set only after a successful remote calendar create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_event_id: Option<String>,
}

impl WorkSession {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime, notes: Option<&str>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            start_time: start,
            end_time: end,
            notes: non_empty(notes),
            remote_event_id: None,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// An end time not after the start time rolls over to the next day.
    pub fn end(&self) -> NaiveDateTime {
        let end = self.date.and_time(self.end_time);
        if self.end_time <= self.start_time {
            end + Duration::days(1)
        } else {
            end
        }
    }

    pub fn is_synced(&self) -> bool {
        self.remote_event_id.is_some()
    }
}

pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

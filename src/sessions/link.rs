//! Keeps `WorkSession::remote_event_id` in step with the calendar.
//!
//! Local state always wins: a failed remote create leaves the session
//! unsynced, a failed remote delete still removes the session locally
//! (the remote event may be left orphaned). Without a calendar backend
//! every operation is local-only.

use crate::calendar::{CalendarBackend, EventLinkage, EventRequest};
use crate::errors::{AppError, AppResult};
use crate::models::{Bucket, WorkItem, WorkSession};
use crate::ui::messages::warning;
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Unsynced,
    Synced,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub session_id: String,
    pub state: LinkState,
    /// Message of a remote failure that was tolerated.
    pub remote_error: Option<String>,
}

/// Fields to change on an existing session; `None` keeps the current value.
/// `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default)]
pub struct SessionEdit {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub notes: Option<String>,
}

pub struct SessionLinker<'a> {
    calendar: Option<&'a dyn CalendarBackend>,
}

impl<'a> SessionLinker<'a> {
    pub fn new(calendar: Option<&'a dyn CalendarBackend>) -> Self {
        Self { calendar }
    }

    /// Attach `session` to `item`, creating the remote event first.
    pub fn add(&self, bucket: Bucket, item: &mut WorkItem, mut session: WorkSession) -> LinkOutcome {
        let mut remote_error = None;

        if let Some(cal) = self.calendar {
            let request = event_request(bucket, item, &session);
            match cal.create_event(&request) {
                Ok(event_id) => session.remote_event_id = Some(event_id),
                Err(e) => remote_error = Some(tolerate("create", &session.id, e)),
            }
        }

        let outcome = LinkOutcome {
            session_id: session.id.clone(),
            state: state_of(&session),
            remote_error,
        };
        item.work_sessions.push(session);
        outcome
    }

    /// Edit a session locally, then push the change to its remote event
    /// when one is linked.
    pub fn update(
        &self,
        bucket: Bucket,
        item: &mut WorkItem,
        session_id: &str,
        edit: &SessionEdit,
    ) -> AppResult<LinkOutcome> {
        let session = item
            .session_mut(session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;

        if let Some(d) = edit.date {
            session.date = d;
        }
        if let Some(t) = edit.start {
            session.start_time = t;
        }
        if let Some(t) = edit.end {
            session.end_time = t;
        }
        if let Some(n) = &edit.notes {
            let n = n.trim();
            session.notes = (!n.is_empty()).then(|| n.to_string());
        }

        let session = item
            .session(session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;

        let mut remote_error = None;
        if let (Some(cal), Some(event_id)) = (self.calendar, session.remote_event_id.as_deref()) {
            let request = event_request(bucket, item, session);
            if let Err(e) = cal.update_event(event_id, &request) {
                remote_error = Some(tolerate("update", session_id, e));
            }
        }

        Ok(LinkOutcome {
            session_id: session_id.to_string(),
            state: state_of(session),
            remote_error,
        })
    }

    /// Remove a session; the remote delete is best effort.
    pub fn delete(&self, item: &mut WorkItem, session_id: &str) -> AppResult<LinkOutcome> {
        let pos = item
            .work_sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;

        let mut remote_error = None;
        if let (Some(cal), Some(event_id)) = (
            self.calendar,
            item.work_sessions[pos].remote_event_id.as_deref(),
        ) && let Err(e) = cal.delete_event(event_id)
        {
            remote_error = Some(tolerate("delete", session_id, e));
        }

        item.work_sessions.remove(pos);

        Ok(LinkOutcome {
            session_id: session_id.to_string(),
            state: LinkState::Deleted,
            remote_error,
        })
    }
}

fn state_of(session: &WorkSession) -> LinkState {
    if session.is_synced() {
        LinkState::Synced
    } else {
        LinkState::Unsynced
    }
}

fn tolerate(op: &str, session_id: &str, e: AppError) -> String {
    let msg = e.to_string();
    warning(format!("Calendar {op} failed for session {session_id}: {msg}"));
    msg
}

/// Session notes win over item notes for the event description.
pub fn event_request(bucket: Bucket, item: &WorkItem, session: &WorkSession) -> EventRequest {
    EventRequest {
        title: item.name.clone(),
        description: session.notes.clone().or_else(|| item.notes.clone()),
        start: session.start(),
        end: session.end(),
        linkage: EventLinkage {
            item_id: item.id.clone(),
            bucket,
            session_id: session.id.clone(),
        },
    }
}

//! External calendar collaborator.
//!
//! Only start, end, description and the linkage back to the local session
//! are relied upon; everything else about an event is opaque.

pub mod sqlite;

pub use sqlite::SqliteCalendar;

use crate::errors::AppResult;
use crate::models::Bucket;
use crate::store::BucketStore;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Points a remote event back at the session it was created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLinkage {
    pub item_id: String,
    pub bucket: Bucket,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub linkage: EventLinkage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub linkage: Option<EventLinkage>,
}

pub trait CalendarBackend {
    /// Returns the id of the new event.
    fn create_event(&self, request: &EventRequest) -> AppResult<String>;
    fn update_event(&self, event_id: &str, request: &EventRequest) -> AppResult<()>;
    fn delete_event(&self, event_id: &str) -> AppResult<()>;
    fn list_events(&self) -> AppResult<Vec<CalendarEvent>>;
}

/// Linked events whose session no longer exists locally, e.g. after a
/// delete whose remote half failed.
pub fn orphaned_events(store: &BucketStore, calendar: &dyn CalendarBackend) -> AppResult<Vec<CalendarEvent>> {
    Ok(calendar
        .list_events()?
        .into_iter()
        .filter(|ev| {
            ev.linkage
                .as_ref()
                .is_some_and(|l| !store.has_session(l.bucket, &l.session_id))
        })
        .collect())
}

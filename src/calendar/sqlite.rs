//! File-backed calendar.

use super::{CalendarBackend, CalendarEvent, EventLinkage, EventRequest};
use crate::errors::{AppError, AppResult};
use crate::models::Bucket;
use crate::utils::time::now_rfc3339;
use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};
use std::fs;
use std::path::{Path, PathBuf};

const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct SqliteCalendar {
    path: PathBuf,
}

fn calendar_err(e: rusqlite::Error) -> AppError {
    AppError::Calendar(e.to_string())
}

fn not_found(event_id: &str) -> AppError {
    AppError::Calendar(format!("event '{event_id}' not found"))
}

impl SqliteCalendar {
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let cal = Self {
            path: path.to_path_buf(),
        };
        cal.conn()?
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS calendar_events (
                    id          TEXT PRIMARY KEY,
                    title       TEXT NOT NULL,
                    description TEXT,
                    start_at    TEXT NOT NULL,
                    end_at      TEXT NOT NULL,
                    item_id     TEXT,
                    bucket      TEXT,
                    session_id  TEXT,
                    created_at  TEXT NOT NULL
                );
                "#,
            )
            .map_err(calendar_err)?;
        Ok(cal)
    }

    fn conn(&self) -> AppResult<Connection> {
        Connection::open(&self.path).map_err(calendar_err)
    }
}

fn map_event(row: &Row) -> rusqlite::Result<CalendarEvent> {
    let parse = |col: &str, raw: String| {
        NaiveDateTime::parse_from_str(&raw, DATETIME_FMT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(format!("{col}: {e}"))),
            )
        })
    };

    let item_id: Option<String> = row.get("item_id")?;
    let bucket: Option<String> = row.get("bucket")?;
    let session_id: Option<String> = row.get("session_id")?;

    let linkage = match (item_id, bucket.as_deref().and_then(Bucket::from_key), session_id) {
        (Some(item_id), Some(bucket), Some(session_id)) => Some(EventLinkage {
            item_id,
            bucket,
            session_id,
        }),
        _ => None,
    };

    Ok(CalendarEvent {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start: parse("start_at", row.get("start_at")?)?,
        end: parse("end_at", row.get("end_at")?)?,
        linkage,
    })
}

impl CalendarBackend for SqliteCalendar {
    fn create_event(&self, request: &EventRequest) -> AppResult<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.conn()?
            .execute(
                "INSERT INTO calendar_events
                 (id, title, description, start_at, end_at, item_id, bucket, session_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    request.title,
                    request.description,
                    request.start.format(DATETIME_FMT).to_string(),
                    request.end.format(DATETIME_FMT).to_string(),
                    request.linkage.item_id,
                    request.linkage.bucket.key(),
                    request.linkage.session_id,
                    now_rfc3339(),
                ],
            )
            .map_err(calendar_err)?;
        Ok(id)
    }

    fn update_event(&self, event_id: &str, request: &EventRequest) -> AppResult<()> {
        let n = self
            .conn()?
            .execute(
                "UPDATE calendar_events
                 SET title = ?2, description = ?3, start_at = ?4, end_at = ?5
                 WHERE id = ?1",
                params![
                    event_id,
                    request.title,
                    request.description,
                    request.start.format(DATETIME_FMT).to_string(),
                    request.end.format(DATETIME_FMT).to_string(),
                ],
            )
            .map_err(calendar_err)?;
        if n == 0 {
            return Err(not_found(event_id));
        }
        Ok(())
    }

    fn delete_event(&self, event_id: &str) -> AppResult<()> {
        let n = self
            .conn()?
            .execute("DELETE FROM calendar_events WHERE id = ?1", [event_id])
            .map_err(calendar_err)?;
        if n == 0 {
            return Err(not_found(event_id));
        }
        Ok(())
    }

    fn list_events(&self) -> AppResult<Vec<CalendarEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare_cached("SELECT * FROM calendar_events ORDER BY start_at ASC")
            .map_err(calendar_err)?;
        let rows = stmt.query_map([], map_event).map_err(calendar_err)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(calendar_err)?);
        }
        Ok(out)
    }
}

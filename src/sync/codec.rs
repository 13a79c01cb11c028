//! Work item <-> table row mapping.
//!
//! Column order is fixed; rows written before the sessions column existed
//! are shorter and still decode.

use crate::models::cell_date::format_cell_date;
use crate::models::{Bucket, CellDate, Priority, Status, WorkItem, WorkSession};
use crate::remote::FIRST_DATA_ROW;
use crate::utils::time::now_rfc3339;

pub const ITEM_HEADERS: [&str; 11] = [
    "Name",
    "Owner",
    "Status",
    "Priority",
    "Start Date",
    "Due Date",
    "Progress",
    "Notes",
    "Created At",
    "Updated At",
    "Work Sessions",
];

pub const ITEM_COLUMNS: usize = ITEM_HEADERS.len();

const COL_NAME: usize = 0;
const COL_OWNER: usize = 1;
const COL_STATUS: usize = 2;
const COL_PRIORITY: usize = 3;
const COL_START: usize = 4;
const COL_DUE: usize = 5;
const COL_PROGRESS: usize = 6;
const COL_NOTES: usize = 7;
const COL_CREATED: usize = 8;
const COL_UPDATED: usize = 9;
const COL_SESSIONS: usize = 10;

/// Encode with `updatedAt` stamped now.
pub fn encode_item(item: &WorkItem) -> Vec<String> {
    encode(item, &now_rfc3339())
}

/// Encode with an explicit `updatedAt` value.
pub fn encode(item: &WorkItem, updated_at: &str) -> Vec<String> {
    vec![
        item.name.clone(),
        item.owner.clone(),
        item.status.as_str().to_string(),
        item.priority.as_str().to_string(),
        format_cell_date(&item.start_date),
        format_cell_date(&item.due_date),
        item.progress.to_string(),
        item.notes.clone().unwrap_or_default(),
        item.created_at.clone(),
        updated_at.to_string(),
        encode_sessions(&item.work_sessions),
    ]
}

/// Rebuild an item from the row at data position `index` (0-based).
pub fn decode(bucket: Bucket, index: usize, row: &[String]) -> WorkItem {
    let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

    WorkItem {
        id: row_id(bucket, index),
        name: cell(COL_NAME).to_string(),
        owner: cell(COL_OWNER).to_string(),
        status: Status::parse(cell(COL_STATUS)),
        priority: Priority::parse(cell(COL_PRIORITY)),
        start_date: CellDate::parse(cell(COL_START)),
        due_date: CellDate::parse(cell(COL_DUE)),
        progress: decode_progress(cell(COL_PROGRESS)),
        notes: Some(cell(COL_NOTES))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        created_at: cell(COL_CREATED).to_string(),
        updated_at: cell(COL_UPDATED).to_string(),
        work_sessions: decode_sessions(cell(COL_SESSIONS)),
    }
}

/// Ids of loaded items derive from their position, e.g. `projects-row-2`.
pub fn row_id(bucket: Bucket, index: usize) -> String {
    format!("{}-row-{}", bucket.key(), index + FIRST_DATA_ROW)
}

fn encode_sessions(sessions: &[WorkSession]) -> String {
    serde_json::to_string(sessions).unwrap_or_else(|_| "[]".to_string())
}

/// Bad JSON means "no sessions", never an error.
pub fn decode_sessions(cell: &str) -> Vec<WorkSession> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(cell).unwrap_or_default()
}

/// Non-numeric means 0; out-of-range values are clamped.
pub fn decode_progress(cell: &str) -> u8 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::cell::{Cell, RefCell};
use std::env;
use std::fs;
use std::path::PathBuf;
use worktrack::calendar::{CalendarBackend, CalendarEvent, EventRequest};
use worktrack::errors::{AppError, AppResult};
use worktrack::models::{Priority, Status, WorkItem, WorkSession};
use worktrack::remote::{MemoryTableStore, TableStore};

pub fn wt() -> Command {
    cargo_bin_cmd!("worktrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty directory inside the temp dir
pub fn temp_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktrack_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path.to_string_lossy().to_string()
}

/// Temp file path with the given content
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.{}", name, ext));
    fs::write(&path, content).expect("write temp file");
    path.to_string_lossy().to_string()
}

/// Id printed between the last pair of parentheses, e.g. "Added ... (abc)"
pub fn id_in_output(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|l| l.contains('(') && l.trim_end().ends_with(')'))
        .expect("line with id");
    let start = line.rfind('(').unwrap() + 1;
    let end = line.rfind(')').unwrap();
    line[start..end].to_string()
}

pub fn date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> chrono::NaiveTime {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// Fully populated item used by codec and sync tests
pub fn sample_item(name: &str) -> WorkItem {
    let mut item = WorkItem::new(name, "Dana");
    item.status = Status::InProgress;
    item.priority = Priority::High;
    item.start_date = Some(date("2025-03-01").into());
    item.due_date = Some(date("2025-04-15").into());
    item.set_progress(45);
    item.set_notes(Some("kick-off done"));
    item.created_at = "2025-02-20T08:00:00Z".to_string();

    let mut session = WorkSession::new(date("2025-03-03"), time("09:00"), time("11:30"), Some("review"));
    session.remote_event_id = Some("evt-1".to_string());
    item.work_sessions.push(session);
    item.work_sessions
        .push(WorkSession::new(date("2025-03-04"), time("14:00"), time("15:00"), None));
    item
}

/// Every field except `id` and `updated_at`
pub fn assert_same_content(a: &WorkItem, b: &WorkItem) {
    assert_eq!(a.name, b.name);
    assert_eq!(a.owner, b.owner);
    assert_eq!(a.status, b.status);
    assert_eq!(a.priority, b.priority);
    assert_eq!(a.start_date, b.start_date);
    assert_eq!(a.due_date, b.due_date);
    assert_eq!(a.progress, b.progress);
    assert_eq!(a.notes, b.notes);
    assert_eq!(a.created_at, b.created_at);
    assert_eq!(a.work_sessions, b.work_sessions);
}

// ---------------------------------------------------------------------------
// Calendar fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCalendar {
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
    pub created: RefCell<Vec<EventRequest>>,
    pub updated: RefCell<Vec<(String, EventRequest)>>,
    pub deleted: RefCell<Vec<String>>,
    pub next: Cell<u32>,
}

impl CalendarBackend for FakeCalendar {
    fn create_event(&self, request: &EventRequest) -> AppResult<String> {
        if self.fail_create {
            return Err(AppError::Calendar("create refused".into()));
        }
        self.next.set(self.next.get() + 1);
        self.created.borrow_mut().push(request.clone());
        Ok(format!("evt-{}", self.next.get()))
    }

    fn update_event(&self, event_id: &str, request: &EventRequest) -> AppResult<()> {
        if self.fail_update {
            return Err(AppError::Calendar("update refused".into()));
        }
        self.updated
            .borrow_mut()
            .push((event_id.to_string(), request.clone()));
        Ok(())
    }

    fn delete_event(&self, event_id: &str) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::Calendar("delete refused".into()));
        }
        self.deleted.borrow_mut().push(event_id.to_string());
        Ok(())
    }

    fn list_events(&self) -> AppResult<Vec<CalendarEvent>> {
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Table store that fails writes for chosen tables
// ---------------------------------------------------------------------------

pub struct FlakyTables {
    pub inner: MemoryTableStore,
    pub fail_writes_for: Vec<&'static str>,
}

impl FlakyTables {
    pub fn failing(tables: &[&'static str]) -> Self {
        Self {
            inner: MemoryTableStore::new(),
            fail_writes_for: tables.to_vec(),
        }
    }
}

impl TableStore for FlakyTables {
    fn ensure_table(&self, table: &str, header: &[&str]) -> AppResult<()> {
        self.inner.ensure_table(table, header)
    }

    fn read_rows(&self, table: &str) -> AppResult<Option<Vec<Vec<String>>>> {
        self.inner.read_rows(table)
    }

    fn clear_rows(&self, table: &str, from_row: usize) -> AppResult<()> {
        self.inner.clear_rows(table, from_row)
    }

    fn write_rows(&self, table: &str, start_row: usize, rows: &[Vec<String>]) -> AppResult<()> {
        if self.fail_writes_for.contains(&table) {
            return Err(AppError::Transport("connection reset".into()));
        }
        self.inner.write_rows(table, start_row, rows)
    }
}

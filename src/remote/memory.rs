use super::{TableStore, HEADER_ROW};
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-process workbook; index 0 of each table is the header row.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: Mutex<BTreeMap<String, Vec<Vec<String>>>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full copy of a table including its header row.
    pub fn snapshot(&self, table: &str) -> Option<Vec<Vec<String>>> {
        self.lock().ok()?.get(table).cloned()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, BTreeMap<String, Vec<Vec<String>>>>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Transport("memory workbook lock poisoned".into()))
    }
}

fn missing(table: &str) -> AppError {
    AppError::Transport(format!("table '{table}' does not exist"))
}

impl TableStore for MemoryTableStore {
    fn ensure_table(&self, table: &str, header: &[&str]) -> AppResult<()> {
        let mut tables = self.lock()?;
        let rows = tables.entry(table.to_string()).or_default();
        let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        if rows.is_empty() {
            rows.push(header);
        } else {
            rows[HEADER_ROW - 1] = header;
        }
        Ok(())
    }

    fn read_rows(&self, table: &str) -> AppResult<Option<Vec<Vec<String>>>> {
        let tables = self.lock()?;
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().skip(HEADER_ROW).cloned().collect()))
    }

    fn clear_rows(&self, table: &str, from_row: usize) -> AppResult<()> {
        let mut tables = self.lock()?;
        let rows = tables.get_mut(table).ok_or_else(|| missing(table))?;
        rows.truncate(from_row.saturating_sub(1));
        Ok(())
    }

    fn write_rows(&self, table: &str, start_row: usize, new_rows: &[Vec<String>]) -> AppResult<()> {
        let mut tables = self.lock()?;
        let rows = tables.get_mut(table).ok_or_else(|| missing(table))?;
        let start = start_row.saturating_sub(1);
        let needed = start + new_rows.len();
        if rows.len() < needed {
            rows.resize(needed, Vec::new());
        }
        for (i, row) in new_rows.iter().enumerate() {
            rows[start + i] = row.clone();
        }
        Ok(())
    }
}

//! File-backed workbook: one SQLite file per location id.

use super::{HEADER_ROW, TableStore};
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteTableStore {
    path: PathBuf,
}

fn transport(e: rusqlite::Error) -> AppError {
    AppError::Transport(e.to_string())
}

impl SqliteTableStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let store = Self {
            path: path.to_path_buf(),
        };
        store.conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sheet_tables (
                name TEXT PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS sheet_rows (
                table_name TEXT NOT NULL,
                row_number INTEGER NOT NULL,
                cells      TEXT NOT NULL,
                PRIMARY KEY (table_name, row_number)
            );
            "#,
        )
        .map_err(transport)?;

        Ok(store)
    }

    /// Workbook `<dir>/<sheet_id>.sqlite`. Ids are restricted to
    /// `[A-Za-z0-9_-]` so they cannot escape `dir`.
    pub fn for_location(dir: &Path, sheet_id: &str) -> AppResult<Self> {
        let valid = !sheet_id.is_empty()
            && sheet_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::Config(format!(
                "invalid table location id '{sheet_id}'"
            )));
        }
        Self::open(&dir.join(format!("{sheet_id}.sqlite")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh connection per call keeps the store `Sync` so buckets can be
    /// written from separate threads.
    fn conn(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path).map_err(transport)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(transport)?;
        Ok(conn)
    }

    fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
        let found: Option<i32> = conn
            .query_row(
                "SELECT 1 FROM sheet_tables WHERE name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()
            .map_err(transport)?;
        Ok(found.is_some())
    }

    fn require_table(conn: &Connection, table: &str) -> AppResult<()> {
        if Self::table_exists(conn, table)? {
            Ok(())
        } else {
            Err(AppError::Transport(format!("table '{table}' does not exist")))
        }
    }
}

impl TableStore for SqliteTableStore {
    fn ensure_table(&self, table: &str, header: &[&str]) -> AppResult<()> {
        let conn = self.conn()?;
        let cells = serde_json::to_string(header)?;
        conn.execute(
            "INSERT OR IGNORE INTO sheet_tables (name) VALUES (?1)",
            [table],
        )
        .map_err(transport)?;
        conn.execute(
            "INSERT OR REPLACE INTO sheet_rows (table_name, row_number, cells) VALUES (?1, ?2, ?3)",
            params![table, HEADER_ROW as i64, cells],
        )
        .map_err(transport)?;
        Ok(())
    }

    fn read_rows(&self, table: &str) -> AppResult<Option<Vec<Vec<String>>>> {
        let conn = self.conn()?;
        if !Self::table_exists(&conn, table)? {
            return Ok(None);
        }

        let mut stmt = conn
            .prepare_cached(
                "SELECT cells FROM sheet_rows
                 WHERE table_name = ?1 AND row_number > ?2
                 ORDER BY row_number ASC",
            )
            .map_err(transport)?;
        let raw = stmt
            .query_map(params![table, HEADER_ROW as i64], |row| row.get::<_, String>(0))
            .map_err(transport)?;

        let mut out = Vec::new();
        for cells in raw {
            let cells = cells.map_err(transport)?;
            out.push(serde_json::from_str::<Vec<String>>(&cells)?);
        }
        Ok(Some(out))
    }

    fn clear_rows(&self, table: &str, from_row: usize) -> AppResult<()> {
        let conn = self.conn()?;
        Self::require_table(&conn, table)?;
        conn.execute(
            "DELETE FROM sheet_rows WHERE table_name = ?1 AND row_number >= ?2",
            params![table, from_row as i64],
        )
        .map_err(transport)?;
        Ok(())
    }

    fn write_rows(&self, table: &str, start_row: usize, rows: &[Vec<String>]) -> AppResult<()> {
        let mut conn = self.conn()?;
        Self::require_table(&conn, table)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(transport)?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT OR REPLACE INTO sheet_rows (table_name, row_number, cells)
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(transport)?;
            for (i, row) in rows.iter().enumerate() {
                let cells = serde_json::to_string(row)?;
                stmt.execute(params![table, (start_row + i) as i64, cells])
                    .map_err(transport)?;
            }
        }
        tx.commit().map_err(transport)?;
        Ok(())
    }
}

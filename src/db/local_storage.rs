//! String key/value storage, the local-state counterpart of browser storage.

use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

pub struct LocalStorage<'c> {
    conn: &'c Connection,
}

impl<'c> LocalStorage<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM local_storage WHERE key = ?1")?;
        Ok(stmt.query_row([key], |row| row.get(0)).optional()?)
    }

    pub fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )?;
        stmt.execute(params![key, value])?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(n > 0)
    }
}

//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::local_storage::LocalStorage;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    pub fn storage(&self) -> LocalStorage<'_> {
        LocalStorage::new(&self.conn)
    }
}

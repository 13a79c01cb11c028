//! Row-oriented remote table store.
//!
//! A location is an opaque id naming one workbook; inside it, tables are
//! addressed by name and rows by 1-based number, row 1 being the header.

pub mod location;
pub mod memory;
pub mod sqlite;

pub use location::{parse_location, resolve_location};
pub use memory::MemoryTableStore;
pub use sqlite::SqliteTableStore;

use crate::errors::AppResult;

pub const HEADER_ROW: usize = 1;
pub const FIRST_DATA_ROW: usize = 2;

pub trait TableStore: Send + Sync {
    /// Create `table` if missing and (re)write its header row.
    fn ensure_table(&self, table: &str, header: &[&str]) -> AppResult<()>;

    /// Rows below the header, in row order; `None` when the table is absent.
    fn read_rows(&self, table: &str) -> AppResult<Option<Vec<Vec<String>>>>;

    /// Erase every row numbered `from_row` or higher.
    fn clear_rows(&self, table: &str, from_row: usize) -> AppResult<()>;

    /// Write `rows` consecutively starting at `start_row`.
    fn write_rows(&self, table: &str, start_row: usize, rows: &[Vec<String>]) -> AppResult<()>;
}

pub mod config;
pub mod import;
pub mod init;
pub mod item;
pub mod load;
pub mod log;
pub mod owner;
pub mod panel;
pub mod session;
pub mod summary;
pub mod sync;

use crate::calendar::SqliteCalendar;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::remote::SqliteTableStore;
use crate::store::persist::{load_store, save_store};
use crate::store::BucketStore;

/// Open the local database and load the bucket store from it.
pub(crate) fn open_store(cfg: &Config) -> AppResult<(DbPool, BucketStore)> {
    let pool = open_db(&cfg.database)?;
    let store = load_store(&pool.storage())?;
    Ok((pool, store))
}

pub(crate) fn persist_store(pool: &DbPool, store: &BucketStore) -> AppResult<()> {
    save_store(&pool.storage(), store)
}

/// Workbook of the configured location, if any.
pub(crate) fn open_remote(cfg: &Config) -> AppResult<Option<SqliteTableStore>> {
    cfg.sheet_id
        .as_deref()
        .map(|id| SqliteTableStore::for_location(&cfg.sheets_path(), id))
        .transpose()
}

pub(crate) fn require_remote(cfg: &Config) -> AppResult<SqliteTableStore> {
    open_remote(cfg)?.ok_or(AppError::NoLocation)
}

pub(crate) fn open_calendar(cfg: &Config) -> AppResult<Option<SqliteCalendar>> {
    cfg.calendar_path()
        .map(|p| SqliteCalendar::open(&p))
        .transpose()
}

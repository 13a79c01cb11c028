//! Clear-then-write synchronisation of buckets with their remote tables.
//!
//! Writes are destructive: the whole data region of a table is erased and
//! rewritten from the local list, so remote-only rows are lost. If the
//! write fails after the clear, the table stays empty until the next
//! successful sync; callers report the error instead of retrying.

use super::codec::{ITEM_HEADERS, decode, encode};
use super::tickets;
use crate::errors::{AppError, AppResult};
use crate::models::{Bucket, TicketSummary, WorkItem};
use crate::remote::{FIRST_DATA_ROW, TableStore};
use crate::store::BucketStore;
use crate::utils::time::now_rfc3339;
use std::thread;

/// Outcome of one bucket write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub bucket: Bucket,
    pub rows: usize,
    /// Value written into every row's `Updated At` cell.
    pub updated_at: String,
}

pub struct SyncEngine<'a> {
    tables: &'a dyn TableStore,
}

impl<'a> SyncEngine<'a> {
    pub fn new(tables: &'a dyn TableStore) -> Self {
        Self { tables }
    }

    pub fn sync(&self, bucket: Bucket, items: &[WorkItem]) -> AppResult<SyncReport> {
        self.sync_at(bucket, items, &now_rfc3339())
    }

    /// Same as [`sync`](Self::sync) with a caller-chosen `updatedAt` stamp.
    pub fn sync_at(&self, bucket: Bucket, items: &[WorkItem], updated_at: &str) -> AppResult<SyncReport> {
        let table = bucket.table_name();
        self.tables.ensure_table(table, &ITEM_HEADERS)?;

        // the write must not start before the clear has completed
        self.tables.clear_rows(table, FIRST_DATA_ROW)?;

        if !items.is_empty() {
            let rows: Vec<Vec<String>> = items.iter().map(|it| encode(it, updated_at)).collect();
            self.tables.write_rows(table, FIRST_DATA_ROW, &rows)?;
        }

        Ok(SyncReport {
            bucket,
            rows: items.len(),
            updated_at: updated_at.to_string(),
        })
    }

    /// Items of `bucket` in row order; an absent table yields an empty list.
    pub fn load(&self, bucket: Bucket) -> AppResult<Vec<WorkItem>> {
        Ok(self.try_load(bucket)?.unwrap_or_default())
    }

    /// Like [`load`](Self::load) but tells an absent table (`None`) apart
    /// from an empty one.
    pub fn try_load(&self, bucket: Bucket) -> AppResult<Option<Vec<WorkItem>>> {
        let Some(rows) = self.tables.read_rows(bucket.table_name())? else {
            return Ok(None);
        };
        Ok(Some(
            rows.iter()
                .enumerate()
                .map(|(i, row)| decode(bucket, i, row))
                .collect(),
        ))
    }

    /// Write every bucket, one worker per bucket. A failure in one bucket
    /// does not stop the others.
    pub fn sync_all(&self, store: &BucketStore) -> Vec<(Bucket, AppResult<SyncReport>)> {
        let updated_at = now_rfc3339();

        thread::scope(|scope| {
            let handles: Vec<_> = Bucket::ALL
                .iter()
                .map(|&bucket| {
                    let items = store.items(bucket);
                    let stamp = updated_at.as_str();
                    (bucket, scope.spawn(move || self.sync_at(bucket, items, stamp)))
                })
                .collect();

            handles
                .into_iter()
                .map(|(bucket, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(AppError::Other(format!("sync worker for {bucket} panicked")))
                    });
                    (bucket, result)
                })
                .collect()
        })
    }

    pub fn load_all(&self) -> AppResult<Vec<(Bucket, Vec<WorkItem>)>> {
        Bucket::ALL
            .iter()
            .map(|&bucket| Ok((bucket, self.load(bucket)?)))
            .collect()
    }

    pub fn sync_tickets(&self, summary: &TicketSummary) -> AppResult<()> {
        tickets::write_summary(self.tables, summary)
    }

    pub fn load_tickets(&self) -> AppResult<Option<TicketSummary>> {
        tickets::read_summary(self.tables)
    }
}

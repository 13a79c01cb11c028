//! In-memory work-item store.
//!
//! The store is mutated locally and independently of any remote call; the
//! sync engine only reads from it, and `load` replaces whole buckets.

pub mod owners;
pub mod persist;

pub use owners::Owners;

use crate::errors::{AppError, AppResult};
use crate::models::{Bucket, TicketSummary, WorkItem};
use crate::sync::engine::SyncReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStore {
    #[serde(default)]
    pub profiles: Vec<WorkItem>,
    #[serde(default)]
    pub contracts: Vec<WorkItem>,
    #[serde(default)]
    pub projects: Vec<WorkItem>,
    #[serde(default)]
    pub ticket_summary: Option<TicketSummary>,
}

impl BucketStore {
    pub fn items(&self, bucket: Bucket) -> &[WorkItem] {
        match bucket {
            Bucket::Profiles => &self.profiles,
            Bucket::Contracts => &self.contracts,
            Bucket::Projects => &self.projects,
        }
    }

    fn items_mut(&mut self, bucket: Bucket) -> &mut Vec<WorkItem> {
        match bucket {
            Bucket::Profiles => &mut self.profiles,
            Bucket::Contracts => &mut self.contracts,
            Bucket::Projects => &mut self.projects,
        }
    }

    /// Append `item`, rejecting an id already present in the bucket.
    /// The stored copy is normalized (see [`WorkItem::normalize`]).
    pub fn add_item(&mut self, bucket: Bucket, mut item: WorkItem) -> AppResult<&WorkItem> {
        if self.find_item(bucket, &item.id).is_some() {
            return Err(AppError::DuplicateId(item.id));
        }
        item.normalize();

        let items = self.items_mut(bucket);
        items.push(item);
        items
            .last()
            .ok_or_else(|| AppError::Other("item vanished after insert".into()))
    }

    pub fn find_item(&self, bucket: Bucket, id: &str) -> Option<&WorkItem> {
        self.items(bucket).iter().find(|it| it.id == id)
    }

    pub fn find_item_mut(&mut self, bucket: Bucket, id: &str) -> Option<&mut WorkItem> {
        self.items_mut(bucket).iter_mut().find(|it| it.id == id)
    }

    /// Look an item up in every bucket.
    pub fn locate_item(&self, id: &str) -> Option<(Bucket, &WorkItem)> {
        Bucket::ALL
            .iter()
            .find_map(|&b| self.find_item(b, id).map(|it| (b, it)))
    }

    pub fn item_mut_or_err(&mut self, bucket: Bucket, id: &str) -> AppResult<&mut WorkItem> {
        self.find_item_mut(bucket, id)
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))
    }

    /// Apply a local edit. `updatedAt` is left alone; it moves on sync.
    pub fn update_item<F>(&mut self, bucket: Bucket, id: &str, edit: F) -> AppResult<()>
    where
        F: FnOnce(&mut WorkItem),
    {
        let item = self.item_mut_or_err(bucket, id)?;
        edit(&mut *item);
        item.normalize();
        Ok(())
    }

    pub fn remove_item(&mut self, bucket: Bucket, id: &str) -> AppResult<WorkItem> {
        let items = self.items_mut(bucket);
        let pos = items
            .iter()
            .position(|it| it.id == id)
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))?;
        Ok(items.remove(pos))
    }

    /// Replace a bucket with freshly loaded items.
    pub fn replace_bucket(&mut self, bucket: Bucket, items: Vec<WorkItem>) {
        *self.items_mut(bucket) = items;
    }

    /// Stamp local items with the `updatedAt` value a sync just wrote.
    pub fn mark_synced(&mut self, report: &SyncReport) {
        for item in self.items_mut(report.bucket) {
            item.updated_at = report.updated_at.clone();
        }
    }

    /// Replace the ticket summary wholesale.
    pub fn apply_summary(&mut self, summary: TicketSummary) {
        self.ticket_summary = Some(summary);
    }

    pub fn ticket_summary(&self) -> Option<&TicketSummary> {
        self.ticket_summary.as_ref()
    }

    /// True when some item of `bucket` owns `session_id`. Session ids are
    /// matched instead of item ids because loaded items get row-derived ids.
    pub fn has_session(&self, bucket: Bucket, session_id: &str) -> bool {
        self.items(bucket)
            .iter()
            .any(|it| it.session(session_id).is_some())
    }
}

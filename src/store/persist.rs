//! Store, owners and UI preference persisted as local-storage blobs.
//!
//! A blob that fails to decode loads as its empty value.

use super::{BucketStore, Owners};
use crate::db::local_storage::LocalStorage;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use serde::de::DeserializeOwned;

pub const BUCKETS_KEY: &str = "worktrack.buckets";
pub const OWNERS_KEY: &str = "worktrack.owners";
pub const PANEL_COLLAPSED_KEY: &str = "worktrack.panel_collapsed";

fn load_blob<T: DeserializeOwned + Default>(storage: &LocalStorage, key: &str) -> AppResult<T> {
    let Some(raw) = storage.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            warning(format!("Ignoring unreadable '{key}' blob: {e}"));
            Ok(T::default())
        }
    }
}

pub fn load_store(storage: &LocalStorage) -> AppResult<BucketStore> {
    load_blob(storage, BUCKETS_KEY)
}

pub fn save_store(storage: &LocalStorage, store: &BucketStore) -> AppResult<()> {
    storage.set(BUCKETS_KEY, &serde_json::to_string(store)?)
}

pub fn load_owners(storage: &LocalStorage) -> AppResult<Owners> {
    load_blob(storage, OWNERS_KEY)
}

pub fn save_owners(storage: &LocalStorage, owners: &Owners) -> AppResult<()> {
    storage.set(OWNERS_KEY, &serde_json::to_string(owners)?)
}

pub fn panel_collapsed(storage: &LocalStorage) -> AppResult<bool> {
    Ok(storage
        .get(PANEL_COLLAPSED_KEY)?
        .is_some_and(|v| v.trim() == "true"))
}

pub fn set_panel_collapsed(storage: &LocalStorage, collapsed: bool) -> AppResult<()> {
    storage.set(PANEL_COLLAPSED_KEY, if collapsed { "true" } else { "false" })
}

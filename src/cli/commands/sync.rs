use crate::cli::commands::{open_store, persist_store, require_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::sync::SyncEngine;
use crate::ui::messages::{error, info, success};

/// Push the local store to the remote tables. A failed bucket is reported
/// and fails the command; it is not retried because its table may already
/// have been cleared.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Sync { bucket, no_tickets } = cmd else {
        return Ok(());
    };

    let remote = require_remote(cfg)?;
    let (pool, mut store) = open_store(cfg)?;
    let engine = SyncEngine::new(&remote);

    let results = match bucket {
        Some(b) => vec![(*b, engine.sync(*b, store.items(*b)))],
        None => engine.sync_all(&store),
    };

    let mut failed = Vec::new();
    for (b, result) in results {
        match result {
            Ok(report) => {
                success(format!("{} → '{}': {} row(s)", b, b.table_name(), report.rows));
                store.mark_synced(&report);
            }
            Err(e) => {
                error(format!("{} sync failed: {}", b, e));
                failed.push(b.key());
            }
        }
    }

    if !*no_tickets && bucket.is_none() {
        match store.ticket_summary() {
            Some(summary) => match engine.sync_tickets(summary) {
                Ok(()) => success("Ticket summary written"),
                Err(e) => {
                    error(format!("ticket summary sync failed: {}", e));
                    failed.push("tickets");
                }
            },
            None => info("No ticket summary to sync."),
        }
    }

    persist_store(&pool, &store)?;

    let target = cfg.sheet_id.clone().unwrap_or_default();
    if failed.is_empty() {
        audit(&pool.conn, "sync", &target, "remote tables overwritten");
        Ok(())
    } else {
        let msg = format!("sync failed for: {}", failed.join(", "));
        audit(&pool.conn, "sync", &target, &msg);
        Err(AppError::Transport(msg))
    }
}

use crate::cli::commands::{open_remote, open_store, persist_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::models::Bucket;
use crate::sync::SyncEngine;
use crate::ui::messages::{info, success};

/// Replace local buckets with the remote tables. Without a configured
/// location, or for a table that does not exist, the local data is kept.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Load { bucket, tickets } = cmd else {
        return Ok(());
    };

    let Some(remote) = open_remote(cfg)? else {
        info("No remote table location configured; nothing loaded.");
        return Ok(());
    };

    let (pool, mut store) = open_store(cfg)?;
    let engine = SyncEngine::new(&remote);

    let buckets = bucket.map(|b| vec![b]).unwrap_or_else(|| Bucket::ALL.to_vec());
    let mut loaded = 0;
    for b in buckets {
        match engine.try_load(b)? {
            Some(items) => {
                success(format!("{} ← '{}': {} item(s)", b, b.table_name(), items.len()));
                loaded += items.len();
                store.replace_bucket(b, items);
            }
            None => info(format!("Table '{}' not found; {} kept.", b.table_name(), b)),
        }
    }

    if *tickets {
        match engine.load_tickets()? {
            Some(summary) => {
                store.apply_summary(summary);
                success("Ticket metrics loaded");
            }
            None => info("No remote ticket summary."),
        }
    }

    persist_store(&pool, &store)?;
    audit(
        &pool.conn,
        "load",
        &cfg.sheet_id.clone().unwrap_or_default(),
        &format!("{loaded} item(s) loaded"),
    );
    Ok(())
}

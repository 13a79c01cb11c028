use crate::cli::commands::summary::print_summary;
use crate::cli::commands::{open_store, persist_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ingest::classify_file;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Import { file, dry_run } = cmd else {
        return Ok(());
    };

    let (pool, mut store) = open_store(cfg)?;
    let path = Path::new(file);

    let Some(summary) = classify_file(path, store.ticket_summary())? else {
        warning(format!("{} has no data rows; nothing imported.", path.display()));
        return Ok(());
    };

    print_summary(&summary);

    if *dry_run {
        info("Dry run: summary not stored.");
        return Ok(());
    }

    let message = format!("{} tickets ({})", summary.total, summary.source_format);
    store.apply_summary(summary);
    persist_store(&pool, &store)?;
    audit(&pool.conn, "import", file, &message);
    success(format!("Ticket summary imported from {}", path.display()));
    Ok(())
}

use crate::calendar::CalendarBackend;
use crate::cli::commands::{open_calendar, open_store, persist_store};
use crate::cli::parser::{Commands, ItemAction, ItemFields};
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::cell_date::format_cell_date;
use crate::models::{Bucket, CellDate, Priority, Status, WorkItem};
use crate::sessions::SessionLinker;
use crate::store::persist::{load_owners, save_owners};
use crate::store::BucketStore;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::table::Table;

/// Empty string clears the date; anything else must be YYYY-MM-DD.
fn parse_date_arg(raw: &str) -> AppResult<Option<CellDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(|d| Some(CellDate::Date(d)))
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// Validate every provided field before touching the item.
fn apply_fields(item: &mut WorkItem, fields: &ItemFields) -> AppResult<()> {
    let start = fields.start.as_deref().map(parse_date_arg).transpose()?;
    let due = fields.due.as_deref().map(parse_date_arg).transpose()?;

    if let Some(owner) = &fields.owner {
        item.owner = owner.trim().to_string();
    }
    if let Some(s) = &fields.status {
        item.status = Status::parse(s);
    }
    if let Some(p) = &fields.priority {
        item.priority = Priority::parse(p);
    }
    if let Some(d) = start {
        item.start_date = d;
    }
    if let Some(d) = due {
        item.due_date = d;
    }
    if let Some(p) = fields.progress {
        if !(0..=100).contains(&p) {
            warning(format!("Progress {p} clamped to 0..=100"));
        }
        item.set_progress(p);
    }
    if let Some(n) = &fields.notes {
        item.set_notes(Some(n));
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Item { action } = cmd else {
        return Ok(());
    };

    let (pool, mut store) = open_store(cfg)?;

    match action {
        ItemAction::Add {
            bucket,
            name,
            fields,
        } => {
            if name.trim().is_empty() {
                return Err(AppError::Other("item name must not be empty".into()));
            }
            let mut item = WorkItem::new(name, &cfg.default_owner);
            apply_fields(&mut item, fields)?;

            if !item.owner.is_empty() {
                let storage = pool.storage();
                let mut owners = load_owners(&storage)?;
                if owners.add(&item.owner) {
                    save_owners(&storage, &owners)?;
                }
            }

            let id = store.add_item(*bucket, item)?.id.clone();
            persist_store(&pool, &store)?;
            audit(&pool.conn, "add", &format!("{bucket}/{id}"), name);
            success(format!("Added {} item '{}' ({})", bucket, name.trim(), id));
        }

        ItemAction::List { bucket } => {
            let buckets = bucket.map(|b| vec![b]).unwrap_or_else(|| Bucket::ALL.to_vec());
            for b in buckets {
                print_bucket(&store, b);
            }
        }

        ItemAction::Edit {
            bucket,
            id,
            name,
            fields,
        } => {
            let item = store.item_mut_or_err(*bucket, id)?;
            apply_fields(item, fields)?;
            if let Some(n) = name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                item.name = n.to_string();
            }
            persist_store(&pool, &store)?;
            audit(&pool.conn, "edit", &format!("{bucket}/{id}"), "item updated");
            success(format!("Updated item {id}"));
        }

        ItemAction::Del { bucket, id } => {
            let calendar = open_calendar(cfg)?;
            let linker = SessionLinker::new(calendar.as_ref().map(|c| c as &dyn CalendarBackend));

            let item = store.item_mut_or_err(*bucket, id)?;
            let session_ids: Vec<String> = item.work_sessions.iter().map(|s| s.id.clone()).collect();
            for sid in session_ids {
                linker.delete(item, &sid)?;
            }

            let removed = store.remove_item(*bucket, id)?;
            persist_store(&pool, &store)?;
            audit(&pool.conn, "del", &format!("{bucket}/{id}"), &removed.name);
            success(format!("Deleted item '{}' ({})", removed.name, id));
        }
    }

    Ok(())
}

fn print_bucket(store: &BucketStore, bucket: Bucket) {
    let items = store.items(bucket);
    if items.is_empty() {
        info(format!("No {bucket} yet."));
        return;
    }

    println!("\n=== {} ({}) ===", bucket.table_name(), items.len());
    let mut table = Table::with_headers(&[
        "ID", "Name", "Owner", "Status", "Priority", "Due", "Progress", "Sessions",
    ]);
    for it in items {
        table.add_row(vec![
            it.id.clone(),
            it.name.clone(),
            it.owner.clone(),
            it.status.to_string(),
            it.priority.to_string(),
            format_cell_date(&it.due_date),
            format!("{}%", it.progress),
            it.work_sessions.len().to_string(),
        ]);
    }
    print!("{}", table.render());
}

use crate::calendar::{CalendarBackend, orphaned_events};
use crate::cli::commands::{open_calendar, open_store, persist_store};
use crate::cli::parser::{Commands, SessionAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::WorkSession;
use crate::sessions::{LinkOutcome, LinkState, SessionEdit, SessionLinker};
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{format_date, parse_date};
use crate::utils::table::Table;
use crate::utils::time::{format_time, parse_optional_time, parse_required_time};

fn report(verb: &str, outcome: &LinkOutcome) {
    let state = match outcome.state {
        LinkState::Synced => "linked to calendar",
        LinkState::Unsynced => "local only",
        LinkState::Deleted => "removed",
    };
    match &outcome.remote_error {
        Some(e) => warning(format!(
            "Session {} {verb} ({state}); calendar error: {e}",
            outcome.session_id
        )),
        None => success(format!("Session {} {verb} ({state})", outcome.session_id)),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Session { action } = cmd else {
        return Ok(());
    };

    let (pool, mut store) = open_store(cfg)?;
    let calendar = open_calendar(cfg)?;
    let backend = calendar.as_ref().map(|c| c as &dyn CalendarBackend);
    let linker = SessionLinker::new(backend);

    match action {
        SessionAction::Add {
            bucket,
            item,
            date,
            start,
            end,
            notes,
        } => {
            let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let session = WorkSession::new(
                d,
                parse_required_time(start)?,
                parse_required_time(end)?,
                notes.as_deref(),
            );

            let target = store.item_mut_or_err(*bucket, item)?;
            let outcome = linker.add(*bucket, target, session);

            persist_store(&pool, &store)?;
            audit(&pool.conn, "session_add", &format!("{bucket}/{item}"), &outcome.session_id);
            report("added", &outcome);
        }

        SessionAction::Edit {
            bucket,
            item,
            session,
            date,
            start,
            end,
            notes,
        } => {
            let edit = SessionEdit {
                date: date
                    .as_deref()
                    .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
                    .transpose()?,
                start: parse_optional_time(start.as_ref())?,
                end: parse_optional_time(end.as_ref())?,
                notes: notes.clone(),
            };

            let target = store.item_mut_or_err(*bucket, item)?;
            let outcome = linker.update(*bucket, target, session, &edit)?;

            persist_store(&pool, &store)?;
            audit(&pool.conn, "session_edit", &format!("{bucket}/{item}"), session);
            report("updated", &outcome);
        }

        SessionAction::Del {
            bucket,
            item,
            session,
        } => {
            let target = store.item_mut_or_err(*bucket, item)?;
            let outcome = linker.delete(target, session)?;

            persist_store(&pool, &store)?;
            audit(&pool.conn, "session_del", &format!("{bucket}/{item}"), session);
            report("deleted", &outcome);
        }

        SessionAction::List { bucket, item } => {
            let target = store
                .find_item(*bucket, item)
                .ok_or_else(|| AppError::ItemNotFound(item.clone()))?;

            if target.work_sessions.is_empty() {
                info(format!("No sessions for '{}'.", target.name));
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "Date", "Start", "End", "Event", "Notes"]);
            for s in &target.work_sessions {
                table.add_row(vec![
                    s.id.clone(),
                    format_date(&s.date),
                    format_time(&s.start_time),
                    format_time(&s.end_time),
                    s.remote_event_id.clone().unwrap_or_else(|| "-".into()),
                    s.notes.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }

        SessionAction::Orphans => {
            let Some(cal) = backend else {
                info("No calendar configured.");
                return Ok(());
            };

            let orphans = orphaned_events(&store, cal)?;
            if orphans.is_empty() {
                success("No orphaned calendar events.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["Event", "Title", "Start", "End", "Session"]);
            for ev in orphans {
                table.add_row(vec![
                    ev.id,
                    ev.title,
                    ev.start.format("%Y-%m-%d %H:%M").to_string(),
                    ev.end.format("%Y-%m-%d %H:%M").to_string(),
                    ev.linkage.map(|l| l.session_id).unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}

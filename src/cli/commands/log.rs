use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "session_add" => Colour::Green,
        "del" | "session_del" => Colour::Red,
        "edit" | "session_edit" => Colour::Yellow,
        "sync" | "load" => Colour::Cyan,
        "import" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)`, cut to `MAX_OP_WIDTH` visible characters.
fn op_label(operation: &str, target: &str) -> String {
    let label = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    if label.chars().count() > MAX_OP_WIDTH {
        let mut s: String = label.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        label
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = open_db(&cfg.database)?;
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let entries = stmt
        .query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);
            Ok((
                row.get::<_, i64>(0)?,
                date,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                row.get::<_, String>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    println!("📜 Internal log:\n");

    let id_w = entries.iter().map(|e| e.0.to_string().len()).max().unwrap_or(1);
    let date_w = entries.iter().map(|e| e.1.len()).max().unwrap_or(10);
    let op_w = entries
        .iter()
        .map(|e| op_label(&e.2, &e.3).chars().count())
        .max()
        .unwrap_or(10);

    for (id, date, operation, target, message) in entries {
        let label = op_label(&operation, &target);
        let padding = " ".repeat(op_w.saturating_sub(label.chars().count()));

        // only the operation word is coloured
        let colored = match label.split_once(' ') {
            Some((op, rest)) => format!("{} {}", color_for_operation(&operation).paint(op), rest),
            None => color_for_operation(&operation).paint(label.as_str()).to_string(),
        };

        println!("{id:>id_w$}: {date:<date_w$} | {colored}{padding} => {message}");
    }

    Ok(())
}

use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::TicketSummary;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

pub fn print_summary(summary: &TicketSummary) {
    header(format!("Tickets ({})", summary.source_format));

    println!("Total     : {}", summary.total);
    println!("Completed : {}", summary.completed);
    println!("Open      : {}", summary.open);
    println!("Pending   : {}", summary.pending);
    if let Some(n) = summary.client_resolved {
        println!("Client resolved   : {n}");
    }
    if let Some(n) = summary.employee_resolved {
        println!("Employee resolved : {n}");
    }
    println!("Imported at : {}", summary.last_imported_at);

    if let Some(groups) = summary.breakdown.as_ref().filter(|b| !b.is_empty()) {
        let columns: Vec<String> = groups[0].values.keys().cloned().collect();
        let mut headers = vec!["Group"];
        headers.extend(columns.iter().map(String::as_str));

        let mut table = Table::with_headers(&headers);
        for g in groups {
            let mut row = vec![g.label.clone()];
            row.extend(
                columns
                    .iter()
                    .map(|c| g.values.get(c).map(|v| v.to_string()).unwrap_or_default()),
            );
            table.add_row(row);
        }
        println!();
        print!("{}", table.render());
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Summary) {
        return Ok(());
    }

    let (_pool, store) = open_store(cfg)?;
    match store.ticket_summary() {
        Some(s) => print_summary(s),
        None => info("No ticket summary imported yet."),
    }
    Ok(())
}

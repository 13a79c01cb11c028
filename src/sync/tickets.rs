//! Ticket metrics region of the `Tickets Summary` table.

use crate::errors::AppResult;
use crate::models::TicketSummary;
use crate::remote::{FIRST_DATA_ROW, TableStore};

pub const TICKET_TABLE: &str = "Tickets Summary";

pub const TICKET_HEADERS: [&str; 6] = [
    "Total",
    "Completed",
    "Open",
    "Pending",
    "Client Resolved",
    "Employee Resolved",
];

pub fn summary_row(summary: &TicketSummary) -> Vec<String> {
    let optional = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_default();
    vec![
        summary.total.to_string(),
        summary.completed.to_string(),
        summary.open.to_string(),
        summary.pending.to_string(),
        optional(summary.client_resolved),
        optional(summary.employee_resolved),
    ]
}

/// Clear-then-write, independent of the bucket tables.
pub fn write_summary(tables: &dyn TableStore, summary: &TicketSummary) -> AppResult<()> {
    tables.ensure_table(TICKET_TABLE, &TICKET_HEADERS)?;
    tables.clear_rows(TICKET_TABLE, FIRST_DATA_ROW)?;
    tables.write_rows(TICKET_TABLE, FIRST_DATA_ROW, &[summary_row(summary)])
}

/// Metrics only: format, timestamp and breakdown are not stored remotely.
pub fn read_summary(tables: &dyn TableStore) -> AppResult<Option<TicketSummary>> {
    let Some(rows) = tables.read_rows(TICKET_TABLE)? else {
        return Ok(None);
    };
    let Some(row) = rows.first() else {
        return Ok(None);
    };

    let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");
    let count = |i: usize| cell(i).replace(',', "").parse::<u64>().unwrap_or(0);
    let optional = |i: usize| {
        let raw = cell(i);
        if raw.is_empty() { None } else { Some(count(i)) }
    };

    let mut summary = TicketSummary::empty();
    summary.total = count(0);
    summary.completed = count(1);
    summary.open = count(2);
    summary.pending = count(3);
    summary.client_resolved = optional(4);
    summary.employee_resolved = optional(5);
    Ok(Some(summary))
}

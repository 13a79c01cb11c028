//! Ticket CSV classifier.
//!
//! Reduces a ticket export (either a per-ticket list or a per-group summary)
//! to one [`TicketSummary`]. Classification is best effort: unknown layouts
//! degrade to a row count and unparseable numbers count as zero.

use crate::errors::AppResult;
use crate::models::{BreakdownEntry, SourceFormat, TicketSummary};
use crate::utils::time::now_rfc3339;
use std::collections::BTreeMap;
use std::path::Path;

const STATUS_HEADERS: [&str; 3] = ["status", "ticket status", "ticket_status"];
const GROUP_NAME_HEADER: &str = "group name";
const GROUP_COUNT_HEADERS: [&str; 3] = ["employee tickets", "client tickets", "internal tickets"];
const CLIENT_RESOLVED_HEADER: &str = "client tickets resolved";
const EMPLOYEE_RESOLVED_HEADER: &str = "employee tickets resolved";
const DEFAULT_GROUP_LABEL: &str = "Group";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketState {
    Completed,
    Pending,
    Open,
}

/// Classify raw CSV text.
///
/// `prior` is the summary currently held by the store; some of its values
/// carry over (see the per-format reducers). Returns `None` when the text
/// has no data row under the header.
pub fn classify(text: &str, prior: Option<&TicketSummary>) -> Option<TicketSummary> {
    let records = read_records(text.as_bytes()).ok()?;
    summarize(records, prior)
}

/// Read and classify a CSV file. A file that is not valid UTF-8 is a
/// [`AppError::Csv`](crate::errors::AppError::Csv) error rather than an
/// empty import.
pub fn classify_file(path: &Path, prior: Option<&TicketSummary>) -> AppResult<Option<TicketSummary>> {
    let bytes = std::fs::read(path)?;
    Ok(summarize(read_records(&bytes)?, prior))
}

fn summarize(mut records: Vec<Vec<String>>, prior: Option<&TicketSummary>) -> Option<TicketSummary> {
    if records.len() < 2 {
        return None;
    }

    let headers: Vec<String> = records
        .remove(0)
        .iter()
        .map(|h| normalize_header(h))
        .collect();

    let summary = match detect_format(&headers) {
        SourceFormat::TicketList => {
            // detect_format guarantees the column exists
            let idx = status_column(&headers).unwrap_or(0);
            reduce_ticket_list(idx, &records, prior)
        }
        SourceFormat::GroupSummary => reduce_group_summary(&headers, &records),
        SourceFormat::Unknown => reduce_unknown(records.len(), prior),
    };

    Some(summary)
}

/// Decide the export shape from already-normalized headers.
pub fn detect_format(headers: &[String]) -> SourceFormat {
    if status_column(headers).is_some() {
        return SourceFormat::TicketList;
    }

    let has = |name: &str| headers.iter().any(|h| h == name);
    if has(GROUP_NAME_HEADER) && GROUP_COUNT_HEADERS.iter().any(|&h| has(h)) {
        return SourceFormat::GroupSummary;
    }

    SourceFormat::Unknown
}

/// Non-blank records, BOM stripped. Fails on the first undecodable record.
fn read_records(bytes: &[u8]) -> Result<Vec<Vec<String>>, csv::Error> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut out = Vec::new();
    for record in rdr.records() {
        let row: Vec<String> = record?.iter().map(str::to_string).collect();
        if row.iter().any(|c| !c.trim().is_empty()) {
            out.push(row);
        }
    }
    Ok(out)
}

fn normalize_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn status_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| STATUS_HEADERS.contains(&h.as_str()))
}

// ---------------------------------------------------------------------------
// TicketList
// ---------------------------------------------------------------------------

fn reduce_ticket_list(
    status_idx: usize,
    rows: &[Vec<String>],
    prior: Option<&TicketSummary>,
) -> TicketSummary {
    let mut summary = TicketSummary::empty();
    summary.source_format = SourceFormat::TicketList;

    for row in rows {
        let cell = row.get(status_idx).map(String::as_str).unwrap_or("");
        match classify_status(cell) {
            TicketState::Completed => summary.completed += 1,
            TicketState::Pending => summary.pending += 1,
            TicketState::Open => summary.open += 1,
        }
    }

    summary.total = rows.len() as u64;

    // A group summary carries the more authoritative total and resolved counts.
    if let Some(prev) = prior
        && prev.source_format == SourceFormat::GroupSummary
    {
        summary.total = prev.total;
        summary.client_resolved = prev.client_resolved;
        summary.employee_resolved = prev.employee_resolved;
    }

    summary
}

fn classify_status(cell: &str) -> TicketState {
    let cell = cell.trim();

    if let Ok(code) = cell.parse::<f64>() {
        return match code {
            c if c == 4.0 || c == 5.0 => TicketState::Completed,
            c if c == 3.0 => TicketState::Pending,
            _ => TicketState::Open,
        };
    }

    let lower = cell.to_lowercase();
    if ["resolved", "closed", "complete"].iter().any(|k| lower.contains(k)) {
        TicketState::Completed
    } else if ["pending", "waiting"].iter().any(|k| lower.contains(k)) {
        TicketState::Pending
    } else {
        TicketState::Open
    }
}

// ---------------------------------------------------------------------------
// GroupSummary
// ---------------------------------------------------------------------------

fn reduce_group_summary(headers: &[String], rows: &[Vec<String>]) -> TicketSummary {
    let group_idx = headers.iter().position(|h| h == GROUP_NAME_HEADER);
    let numeric_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.ends_with("tickets") || h.ends_with("resolved"))
        .map(|(i, _)| i)
        .collect();

    let has_client = headers.iter().any(|h| h == CLIENT_RESOLVED_HEADER);
    let has_employee = headers.iter().any(|h| h == EMPLOYEE_RESOLVED_HEADER);

    let mut total = 0u64;
    let mut client_resolved = 0u64;
    let mut employee_resolved = 0u64;
    let mut breakdown = Vec::with_capacity(rows.len());

    for row in rows {
        let mut values = BTreeMap::new();

        for &i in &numeric_cols {
            let header = &headers[i];
            let value = parse_number(row.get(i).map(String::as_str).unwrap_or(""));
            values.insert(header.clone(), value);

            if header.ends_with("tickets") && !header.contains("resolved") {
                total += to_count(value);
            } else if header == CLIENT_RESOLVED_HEADER {
                client_resolved += to_count(value);
            } else if header == EMPLOYEE_RESOLVED_HEADER {
                employee_resolved += to_count(value);
            }
        }

        let label = group_idx
            .and_then(|i| row.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_GROUP_LABEL)
            .to_string();

        breakdown.push(BreakdownEntry { label, values });
    }

    let completed = client_resolved + employee_resolved;

    TicketSummary {
        total,
        completed,
        open: total.saturating_sub(completed),
        pending: 0,
        client_resolved: has_client.then_some(client_resolved),
        employee_resolved: has_employee.then_some(employee_resolved),
        last_imported_at: now_rfc3339(),
        source_format: SourceFormat::GroupSummary,
        breakdown: Some(breakdown),
    }
}

/// Thousands separators and surrounding blanks are ignored; junk is 0.
fn parse_number(cell: &str) -> f64 {
    let cleaned: String = cell
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn to_count(value: f64) -> u64 {
    if value > 0.0 { value.round() as u64 } else { 0 }
}

// ---------------------------------------------------------------------------
// Unknown
// ---------------------------------------------------------------------------

fn reduce_unknown(row_count: usize, prior: Option<&TicketSummary>) -> TicketSummary {
    let mut summary = match prior {
        Some(prev) => prev.clone(),
        None => TicketSummary::empty(),
    };
    summary.total = row_count as u64;
    summary.source_format = SourceFormat::Unknown;
    summary.last_imported_at = now_rfc3339();
    summary
}

use worktrack::models::{Bucket, CellDate, Priority, Status, WorkItem, WorkSession};
use worktrack::store::BucketStore;
use worktrack::utils::time::parse_required_time;
use worktrack::sync::codec::{ITEM_COLUMNS, ITEM_HEADERS, decode, decode_progress, encode, encode_item, row_id};

mod common;
use common::{assert_same_content, date, sample_item, time};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_decode_restores_encoded_item() {
    let item = sample_item("Website relaunch");
    let encoded = encode_item(&item);
    let decoded = decode(Bucket::Projects, 0, &encoded);

    assert_same_content(&item, &decoded);
    assert_eq!(decoded.id, "projects-row-2");
    assert_eq!(decoded.updated_at, encoded[9]);
    assert_eq!(
        decoded.work_sessions[0].remote_event_id.as_deref(),
        Some("evt-1")
    );
}

#[test]
fn test_encode_column_layout() {
    let mut item = WorkItem::new("Audit", "Lee");
    item.created_at = "2025-01-01T00:00:00Z".to_string();
    let cells = encode(&item, "2025-01-02T10:00:00Z");

    assert_eq!(cells.len(), ITEM_COLUMNS);
    assert_eq!(ITEM_HEADERS[0], "Name");
    assert_eq!(ITEM_HEADERS[10], "Work Sessions");
    assert_eq!(
        cells,
        row(&[
            "Audit",
            "Lee",
            "Not Started",
            "Medium",
            "",
            "",
            "0",
            "",
            "2025-01-01T00:00:00Z",
            "2025-01-02T10:00:00Z",
            "[]",
        ])
    );
}

#[test]
fn test_zero_progress_and_empty_notes_survive() {
    let mut item = WorkItem::new("Zero", "Lee");
    item.set_notes(Some("   "));
    assert!(item.notes.is_none());

    let decoded = decode(Bucket::Profiles, 3, &encode(&item, "t"));
    assert_eq!(decoded.progress, 0);
    assert!(decoded.notes.is_none());
    assert!(decoded.start_date.is_none());
    assert_eq!(decoded.id, "profiles-row-5");
}

#[test]
fn test_decode_short_rows() {
    let ten = row(&[
        "Old row", "Kim", "Completed", "Low", "2024-05-01", "", "100", "legacy", "c", "u",
    ]);
    let item = decode(Bucket::Contracts, 0, &ten);
    assert_eq!(item.name, "Old row");
    assert_eq!(item.status, Status::Completed);
    assert_eq!(item.priority, Priority::Low);
    assert_eq!(item.start_date.and_then(|d| d.date()), Some(date("2024-05-01")));
    assert_eq!(item.progress, 100);
    assert!(item.work_sessions.is_empty());

    let three = row(&["Stub", "Kim", ""]);
    let item = decode(Bucket::Contracts, 1, &three);
    assert_eq!(item.name, "Stub");
    assert_eq!(item.status, Status::NotStarted);
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(item.progress, 0);
    assert!(item.created_at.is_empty());
}

#[test]
fn test_bad_sessions_json_yields_no_sessions() {
    let mut cells = encode(&sample_item("Broken"), "t");
    cells[10] = "{not json".to_string();
    let item = decode(Bucket::Projects, 0, &cells);
    assert!(item.work_sessions.is_empty());
    assert_eq!(item.name, "Broken");
}

#[test]
fn test_progress_cell_is_clamped() {
    assert_eq!(decode_progress("150"), 100);
    assert_eq!(decode_progress("-4"), 0);
    assert_eq!(decode_progress("42.6"), 43);
    assert_eq!(decode_progress("half"), 0);
    assert_eq!(decode_progress(""), 0);
}

#[test]
fn test_unrecognised_labels_are_kept() {
    let mut item = WorkItem::new("Odd", "Lee");
    item.status = Status::parse("Blocked by vendor");
    item.priority = Priority::parse("P0");

    let decoded = decode(Bucket::Projects, 0, &encode(&item, "t"));
    assert_eq!(decoded.status.as_str(), "Blocked by vendor");
    assert_eq!(decoded.priority.as_str(), "P0");
}

#[test]
fn test_row_ids_follow_sheet_rows() {
    assert_eq!(row_id(Bucket::Profiles, 0), "profiles-row-2");
    assert_eq!(row_id(Bucket::Projects, 9), "projects-row-11");
}

#[test]
fn test_session_seconds_survive_round_trip() {
    let mut item = WorkItem::new("Standup", "Lee");
    let start = parse_required_time("09:00:30").expect("time");
    let end = parse_required_time("09:15").expect("time");
    item.work_sessions
        .push(WorkSession::new(date("2025-03-03"), start, end, None));

    let cells = encode(&item, "t");
    assert!(cells[10].contains("\"09:00:30\""));
    assert!(cells[10].contains("\"09:15\""));

    let decoded = decode(Bucket::Projects, 0, &cells);
    assert_same_content(&item, &decoded);
    assert_eq!(decoded.work_sessions[0].start_time, start);
    assert_eq!(decoded.work_sessions[0].start_time, time("09:00") + chrono::Duration::seconds(30));
}

#[test]
fn test_non_iso_date_cells_are_written_back_unchanged() {
    let cells = row(&[
        "Legacy", "Kim", "In Progress", "High", "03/15/2024", "Q3 2024", "10", "", "c", "u", "",
    ]);
    let item = decode(Bucket::Contracts, 0, &cells);

    assert_eq!(item.start_date, Some(CellDate::Raw("03/15/2024".into())));
    assert!(item.start_date.as_ref().and_then(CellDate::date).is_none());
    assert_eq!(item.due_date, Some(CellDate::Raw("Q3 2024".into())));

    let again = encode(&item, "u");
    assert_eq!(again[4], "03/15/2024");
    assert_eq!(again[5], "Q3 2024");
    assert_same_content(&item, &decode(Bucket::Contracts, 0, &again));
}

#[test]
fn test_raw_dates_survive_local_persistence() {
    let mut item = WorkItem::new("Legacy", "Kim");
    item.start_date = CellDate::parse("03/15/2024");
    item.due_date = CellDate::parse("2024-06-30");

    let json = serde_json::to_string(&item).expect("json");
    assert!(json.contains("\"startDate\":\"03/15/2024\""));
    assert!(json.contains("\"dueDate\":\"2024-06-30\""));

    let back: WorkItem = serde_json::from_str(&json).expect("json");
    assert_eq!(back, item);
    assert_eq!(back.due_date.and_then(|d| d.date()), Some(date("2024-06-30")));
}

#[test]
fn test_stored_labels_match_decoded_labels() {
    let mut store = BucketStore::default();
    let mut item = WorkItem::new("Labels", "Lee");
    item.status = Status::Other("  Blocked ".into());
    item.priority = Priority::Other(String::new());
    let id = item.id.clone();

    let stored = store.add_item(Bucket::Projects, item).expect("add").clone();
    assert_eq!(stored.status, Status::Other("Blocked".into()));
    assert_eq!(stored.priority, Priority::Medium);
    assert_same_content(&stored, &decode(Bucket::Projects, 0, &encode(&stored, "t")));

    store
        .update_item(Bucket::Projects, &id, |it| it.status = Status::Other(" ".into()))
        .expect("update");
    let updated = store.find_item(Bucket::Projects, &id).expect("item");
    assert_eq!(updated.status, Status::NotStarted);
    assert_same_content(updated, &decode(Bucket::Projects, 0, &encode(updated, "t")));
}

use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;
use worktrack::models::Bucket;
use worktrack::remote::{SqliteTableStore, TableStore};
use worktrack::sync::SyncEngine;

mod common;
use common::{id_in_output, setup_test_db, temp_dir, temp_file, wt};

fn init(db_path: &str) {
    wt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));
}

fn add_item(db_path: &str, bucket: &str, name: &str, extra: &[&str]) -> String {
    let mut args = vec!["--db", db_path, "item", "add", bucket, name];
    args.extend_from_slice(extra);
    let out = wt().args(&args).output().expect("run");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    id_in_output(&out.stdout)
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");
    init(&db_path);
    assert!(Path::new(&db_path).exists());

    // second run applies nothing new
    wt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied").not());
}

#[test]
fn test_item_add_list_edit_delete() {
    let db_path = setup_test_db("cli_items");
    init(&db_path);

    let id = add_item(
        &db_path,
        "projects",
        "Website",
        &["--owner", "Ann", "--progress", "140", "--due", "2025-09-30"],
    );

    wt().args(["--db", &db_path, "item", "list", "projects"])
        .assert()
        .success()
        .stdout(contains("Website"))
        .stdout(contains("Ann"))
        .stdout(contains("100%"))
        .stdout(contains("2025-09-30"));

    wt().args(["--db", &db_path, "owner", "list"])
        .assert()
        .success()
        .stdout(contains("- Ann"));

    wt().args([
        "--db", &db_path, "item", "edit", "projects", &id, "--status", "completed", "--name",
        "Website v2",
    ])
    .assert()
    .success();

    wt().args(["--db", &db_path, "item", "list"])
        .assert()
        .success()
        .stdout(contains("Website v2"))
        .stdout(contains("Completed"))
        .stdout(contains("No profiles yet."));

    wt().args(["--db", &db_path, "item", "del", "projects", &id])
        .assert()
        .success()
        .stdout(contains("Deleted item 'Website v2'"));

    wt().args(["--db", &db_path, "item", "edit", "projects", &id, "--progress", "5"])
        .assert()
        .failure()
        .stderr(contains("Work item not found"));
}

#[test]
fn test_item_rejects_bad_date() {
    let db_path = setup_test_db("cli_bad_date");
    init(&db_path);

    wt().args(["--db", &db_path, "item", "add", "contracts", "X", "--start", "31/12/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_import_and_summary() {
    let db_path = setup_test_db("cli_import");
    init(&db_path);

    let csv = temp_file(
        "cli_import",
        "csv",
        "Group Name,Employee Tickets,Client Tickets,Client Tickets Resolved,Employee Tickets Resolved\nIT,5,10,4,8\n",
    );

    wt().args(["--db", &db_path, "import", &csv, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Total     : 15"))
        .stdout(contains("Dry run"));

    wt().args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("No ticket summary imported yet."));

    wt().args(["--db", &db_path, "import", &csv])
        .assert()
        .success()
        .stdout(contains("Ticket summary imported"));

    wt().args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("group summary"))
        .stdout(contains("Completed : 12"))
        .stdout(contains("Client resolved   : 4"));

    let empty = temp_file("cli_import_empty", "csv", "Status\n");
    wt().args(["--db", &db_path, "import", &empty])
        .assert()
        .success()
        .stderr(contains("nothing imported"));
}

#[test]
fn test_sync_requires_location() {
    let db_path = setup_test_db("cli_sync_no_location");
    init(&db_path);

    wt().args(["--db", &db_path, "sync"])
        .assert()
        .failure()
        .stderr(contains("No remote table location configured"));

    wt().args(["--db", &db_path, "load"])
        .assert()
        .success()
        .stdout(contains("nothing loaded"));
}

#[test]
fn test_sync_then_load_through_cli() {
    let db_path = setup_test_db("cli_sync_load");
    let sheets = temp_dir("cli_sync_load");
    init(&db_path);

    add_item(&db_path, "profiles", "Resume", &["--owner", "Kim"]);
    add_item(&db_path, "projects", "Portal", &["--progress", "30", "--notes", "phase one"]);

    let csv = temp_file("cli_sync_load", "csv", "Status\nResolved\nopen\n3\n");
    wt().args(["--db", &db_path, "import", &csv]).assert().success();

    wt().args(["--db", &db_path, "--sheets-dir", &sheets, "--sheet", "?sheet=book1", "sync"])
        .assert()
        .success()
        .stdout(contains("'Main Projects': 1 row(s)"))
        .stdout(contains("'Contracts': 0 row(s)"))
        .stdout(contains("Ticket summary written"));

    let tables = SqliteTableStore::for_location(Path::new(&sheets), "book1").expect("open");
    let rows = tables.read_rows("Main Projects").expect("read").expect("table");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Portal");
    assert_eq!(rows[0][7], "phase one");
    let tickets = SyncEngine::new(&tables).load_tickets().expect("read").expect("row");
    assert_eq!(tickets.total, 3);

    // a second database loads what the first one wrote
    let other_db = setup_test_db("cli_sync_load_other");
    init(&other_db);
    wt().args(["--db", &other_db, "--sheets-dir", &sheets, "--sheet", "book1", "load", "--tickets"])
        .assert()
        .success()
        .stdout(contains("'Profiles': 1 item(s)"))
        .stdout(contains("Ticket metrics loaded"));

    wt().args(["--db", &other_db, "item", "list", "projects"])
        .assert()
        .success()
        .stdout(contains("projects-row-2"))
        .stdout(contains("30%"));

    wt().args(["--db", &other_db, "summary"])
        .assert()
        .success()
        .stdout(contains("Total     : 3"));
}

#[test]
fn test_single_bucket_sync_keeps_other_tables() {
    let db_path = setup_test_db("cli_single_bucket");
    let sheets = temp_dir("cli_single_bucket");
    init(&db_path);

    let tables = SqliteTableStore::for_location(Path::new(&sheets), "solo").expect("open");
    let engine = SyncEngine::new(&tables);
    engine
        .sync(Bucket::Profiles, &[worktrack::models::WorkItem::new("Remote only", "Lee")])
        .expect("seed");

    add_item(&db_path, "contracts", "Retainer", &[]);
    wt().args(["--db", &db_path, "--sheets-dir", &sheets, "--sheet", "solo", "sync", "--bucket", "contracts"])
        .assert()
        .success()
        .stdout(contains("'Contracts': 1 row(s)"))
        .stdout(contains("Ticket summary").not());

    assert_eq!(engine.load(Bucket::Profiles).expect("load")[0].name, "Remote only");
    assert_eq!(engine.load(Bucket::Contracts).expect("load")[0].name, "Retainer");
}

#[test]
fn test_sessions_with_calendar() {
    let db_path = setup_test_db("cli_sessions");
    let dir = temp_dir("cli_sessions");
    let calendar = Path::new(&dir).join("calendar.sqlite").to_string_lossy().to_string();
    init(&db_path);

    let id = add_item(&db_path, "projects", "Audit", &["--notes", "ledgers"]);

    wt().args([
        "--db", &db_path, "--calendar", &calendar, "session", "add", "projects", &id, "2025-05-05",
        "09:00", "10:30",
    ])
    .assert()
    .success()
    .stdout(contains("linked to calendar"));

    wt().args(["--db", &db_path, "session", "add", "projects", &id, "2025-05-06", "22:00", "01:00"])
        .assert()
        .success()
        .stdout(contains("local only"));

    wt().args(["--db", &db_path, "session", "list", "projects", &id])
        .assert()
        .success()
        .stdout(contains("2025-05-05"))
        .stdout(contains("22:00"));

    wt().args(["--db", &db_path, "--calendar", &calendar, "session", "orphans"])
        .assert()
        .success()
        .stdout(contains("No orphaned calendar events."));

    // deleting the item without the calendar leaves its event behind
    wt().args(["--db", &db_path, "item", "del", "projects", &id])
        .assert()
        .success();

    wt().args(["--db", &db_path, "--calendar", &calendar, "session", "orphans"])
        .assert()
        .success()
        .stdout(contains("Audit"));

    wt().args(["--db", &db_path, "session", "add", "projects", &id, "2025-05-05", "9am", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_owner_and_panel_commands() {
    let db_path = setup_test_db("cli_owner_panel");
    init(&db_path);

    wt().args(["--db", &db_path, "owner", "add", "Bo"])
        .assert()
        .success()
        .stdout(contains("Owner 'Bo' added"));
    wt().args(["--db", &db_path, "owner", "add", "bo"])
        .assert()
        .success()
        .stderr(contains("already known"));
    wt().args(["--db", &db_path, "owner", "del", "BO"])
        .assert()
        .success()
        .stdout(contains("removed"));

    wt().args(["--db", &db_path, "panel"])
        .assert()
        .success()
        .stdout(contains("Panel: expanded"));
    wt().args(["--db", &db_path, "panel", "--collapse"])
        .assert()
        .success()
        .stdout(contains("Panel: collapsed"));
    wt().args(["--db", &db_path, "panel"])
        .assert()
        .success()
        .stdout(contains("Panel: collapsed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init(&db_path);
    add_item(&db_path, "profiles", "Logged", &[]);

    wt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("add"));
}

#[test]
fn test_config_print_shows_overrides() {
    let db_path = setup_test_db("cli_config_print");
    init(&db_path);

    wt().args(["--db", &db_path, "--sheet", "https://host/app?sheet=abc", "config", "--print"])
        .assert()
        .success()
        .stdout(contains(db_path.as_str()))
        .stdout(contains("sheet_id: abc"));
}

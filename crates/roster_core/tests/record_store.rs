mod support;

use roster_core::db::migrations::latest_version;
use roster_core::db::{open_db, open_db_in_memory, DbError};
use roster_core::{
    CatalogService, InterviewDuration, Notes, RecordRepository, RepoError,
    SqliteRecordRepository, StartTime,
};
use rusqlite::params;
use support::{names, typical_catalog, typical_records};

#[test]
fn fresh_database_is_at_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('records', 'record_tags');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 2);
}

#[test]
fn reopening_a_file_keeps_schema_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.sqlite3");

    {
        let mut conn = open_db(&path).unwrap();
        let mut repo = SqliteRecordRepository::new(&mut conn);
        repo.save_catalog(&typical_catalog()).unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let repo = SqliteRecordRepository::new(&mut conn);
    assert_eq!(repo.load_catalog().unwrap(), typical_catalog());
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } if db_version == latest_version() + 1 && latest_supported == latest_version()
    ));
}

#[test]
fn empty_database_loads_empty_catalog() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    assert!(repo.load_catalog().unwrap().is_empty());
}

#[test]
fn save_and_load_preserve_order_tags_and_schedule() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRecordRepository::new(&mut conn);

    let mut records = typical_records();
    records.reverse();
    records[0] = records[0]
        .with_notes(Notes::parse("prefers remote").unwrap())
        .with_schedule(
            Some(StartTime::parse("2025-06-02 13:45").unwrap()),
            Some(InterviewDuration::from_minutes(90).unwrap()),
        );
    let catalog = roster_core::Catalog::from_records(records).unwrap();

    repo.save_catalog(&catalog).unwrap();
    let loaded = repo.load_catalog().unwrap();

    assert_eq!(loaded, catalog);
    assert_eq!(loaded.list()[0].name().as_str(), "George Best");
    assert_eq!(loaded.list()[0].notes().as_str(), "prefers remote");
    let benson = &loaded.list()[5];
    assert_eq!(benson.tags().len(), 2);
}

#[test]
fn save_replaces_previous_contents() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRecordRepository::new(&mut conn);

    repo.save_catalog(&typical_catalog()).unwrap();
    let smaller = roster_core::Catalog::from_records(typical_records().into_iter().take(2)).unwrap();
    repo.save_catalog(&smaller).unwrap();

    let loaded = repo.load_catalog().unwrap();
    assert_eq!(names(loaded.list()), vec!["Alice Pauline", "Benson Meier"]);
}

#[test]
fn invalid_stored_values_are_reported() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO records (email, position, name, phone, address, job_position, team, notes, start_time, duration_minutes)
         VALUES (?1, 0, 'Carl Kurz', '95352563', 'wall street', 'Data Analyst', 'Analytics', '', ?2, NULL);",
        params!["heinz@example.com", "2025-06-02 13:47"],
    )
    .unwrap();

    let repo = SqliteRecordRepository::new(&mut conn);
    let err = repo.load_catalog().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("records.start_time")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn service_open_loads_stored_catalog() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteRecordRepository::new(&mut conn);
        repo.save_catalog(&typical_catalog()).unwrap();
    }

    let repo = SqliteRecordRepository::new(&mut conn);
    let service = CatalogService::open(repo).unwrap();
    assert_eq!(service.displayed().len(), 7);
    assert!(!service.history().can_undo());
}

#[test]
fn non_database_file_is_reported_as_not_a_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text, not a catalog\n".repeat(64)).unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::NotACatalog));
    assert_eq!(err.code(), "db_not_a_catalog");
}

#[test]
fn unreachable_path_is_reported_as_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("roster.sqlite3");

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Open { target, .. } => assert!(target.ends_with("roster.sqlite3")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), "db_open_failed");
}

#[test]
fn out_of_range_duration_is_invalid_data() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO records (email, position, name, phone, address, job_position, team, notes, start_time, duration_minutes)
         VALUES ('heinz@example.com', 0, 'Carl Kurz', '95352563', 'wall street', 'Data Analyst', 'Analytics', '', '2025-06-02 13:45', ?1);",
        params![70_000_i64],
    )
    .unwrap();

    let repo = SqliteRecordRepository::new(&mut conn);
    match repo.load_catalog().unwrap_err() {
        RepoError::InvalidData(message) => {
            assert!(message.contains("records.duration_minutes"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

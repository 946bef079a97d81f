mod support;

use roster_core::db::open_db_in_memory;
use roster_core::{
    Catalog, CatalogService, HistoryError, Name, RecordPatch, RecordRepository, RepoError,
    RepoResult, ServiceError, SqliteRecordRepository,
};
use support::{candidate, names, typical_catalog};

#[test]
fn undo_restores_deleted_record() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    service.delete_record(7).unwrap();
    assert_eq!(service.current().len(), 6);

    service.undo().unwrap();
    assert_eq!(service.current().len(), 7);
    assert_eq!(service.displayed().len(), 7);
}

#[test]
fn undo_on_fresh_session_fails() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    let err = service.undo().unwrap_err();
    assert!(matches!(
        err,
        ServiceError::History(HistoryError::NoUndoableState)
    ));
    assert_eq!(service.history().history_len(), 1);
}

#[test]
fn redo_replays_undone_deletes_one_at_a_time() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    service.delete_record(7).unwrap();
    service.delete_record(6).unwrap();
    service.undo().unwrap();
    service.undo().unwrap();
    assert_eq!(service.current().len(), 7);

    service.redo().unwrap();
    assert_eq!(service.current().len(), 6);
    service.redo().unwrap();
    assert_eq!(service.current().len(), 5);

    let err = service.redo().unwrap_err();
    assert!(matches!(
        err,
        ServiceError::History(HistoryError::NoRedoableState)
    ));
}

#[test]
fn new_mutation_after_undo_discards_redo_history() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    service.delete_record(7).unwrap();
    service.delete_record(6).unwrap();
    service.undo().unwrap();
    service.delete_record(5).unwrap();

    let err = service.redo().unwrap_err();
    assert!(matches!(
        err,
        ServiceError::History(HistoryError::NoRedoableState)
    ));
    assert_eq!(service.history().history_len(), 3);
}

#[test]
fn queries_between_undo_and_redo_do_not_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    service.delete_record(1).unwrap();
    service.undo().unwrap();
    let history_len = service.history().history_len();

    service.list_all();
    service.sort_by_start_time();
    service.find_by_name(vec!["Meier".to_string()]);
    assert_eq!(service.history().history_len(), history_len);

    service.redo().unwrap();
    assert_eq!(service.current().len(), 6);
}

#[test]
fn failed_mutation_consumes_no_history_slot() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    let duplicate = candidate("Alice Clone", "alice@example.com", "Designer", "Design", &[]);
    assert!(matches!(
        service.add_record(duplicate).unwrap_err(),
        ServiceError::Catalog(_)
    ));
    assert!(matches!(
        service.delete_record(0).unwrap_err(),
        ServiceError::InvalidIndex { index: 0, .. }
    ));
    assert!(matches!(
        service.delete_record(8).unwrap_err(),
        ServiceError::InvalidIndex {
            index: 8,
            displayed: 7
        }
    ));
    assert!(matches!(
        service.edit_record(1, &RecordPatch::default()).unwrap_err(),
        ServiceError::NothingToEdit
    ));

    assert_eq!(service.history().history_len(), 1);
    assert_eq!(service.current(), &typical_catalog());
}

#[test]
fn edit_is_undoable_and_keeps_position() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    let patch = RecordPatch {
        name: Some(Name::parse("Carl Kurz Jr").unwrap()),
        ..RecordPatch::default()
    };
    let edited = service.edit_record(3, &patch).unwrap();
    assert_eq!(service.current().list()[2], edited);

    service.undo().unwrap();
    assert_eq!(service.current().list()[2].name().as_str(), "Carl Kurz");
    service.redo().unwrap();
    assert_eq!(service.current().list()[2], edited);
}

#[test]
fn clear_is_one_undoable_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = CatalogService::with_catalog(repo, typical_catalog());

    service.clear().unwrap();
    assert!(service.current().is_empty());
    assert!(service.displayed().is_empty());

    service.undo().unwrap();
    assert_eq!(names(service.displayed()).len(), 7);
}

#[test]
fn storage_follows_the_current_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteRecordRepository::new(&mut conn);
        let mut service = CatalogService::with_catalog(repo, typical_catalog());
        service.delete_record(1).unwrap();
        service.delete_record(1).unwrap();
        service.undo().unwrap();
    }

    let repo = SqliteRecordRepository::new(&mut conn);
    let stored = repo.load_catalog().unwrap();
    assert_eq!(stored.len(), 6);
    assert_eq!(stored.list()[0].name().as_str(), "Benson Meier");
}

struct ReadOnlyRepository;

impl RecordRepository for ReadOnlyRepository {
    fn load_catalog(&self) -> RepoResult<Catalog> {
        Ok(Catalog::new())
    }

    fn save_catalog(&mut self, _catalog: &Catalog) -> RepoResult<()> {
        Err(RepoError::InvalidData("catalog is read-only".to_string()))
    }
}

#[test]
fn save_failure_keeps_the_commit() {
    let mut service = CatalogService::with_catalog(ReadOnlyRepository, typical_catalog());

    let added = candidate("Hoon Meier", "stefan@example.com", "Recruiter", "People", &[]);
    let err = service.add_record(added.clone()).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::InvalidData(_))));

    assert_eq!(service.history().history_len(), 2);
    assert_eq!(service.current().len(), 8);
    assert_eq!(service.displayed().last(), Some(&added));
}

#[test]
fn save_failure_keeps_the_history_move() {
    let mut service = CatalogService::with_catalog(ReadOnlyRepository, typical_catalog());
    assert!(service.delete_record(1).is_err());
    assert_eq!(service.current().len(), 6);

    let err = service.undo().unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(service.history().cursor(), 0);
    assert_eq!(service.displayed().len(), 7);

    let err = service.redo().unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(service.history().cursor(), 1);
    assert_eq!(service.displayed().len(), 6);
}

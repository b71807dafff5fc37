use tasklist_core::db::open_db;
use tasklist_core::{
    DeleteOutcome, KeyValueStore, MemoryStore, SeedLoadError, SqliteKvStore, TaskList,
    TaskRecord, TaskServiceError, TOMBSTONE_KEY,
};

fn empty_list(store: &MemoryStore) -> TaskList<&MemoryStore> {
    TaskList::open(store, Err(SeedLoadError::NotFound("none".into()))).unwrap()
}

fn seeded_list(store: &MemoryStore) -> TaskList<&MemoryStore> {
    let seed = vec![
        TaskRecord::with_id("a", "X", false).unwrap(),
        TaskRecord::with_id("b", "Y", true).unwrap(),
    ];
    TaskList::open(store, Ok(seed)).unwrap()
}

#[test]
fn create_then_query_returns_new_user_task() {
    let store = MemoryStore::new();
    let list = empty_list(&store);

    list.create("Buy milk").unwrap();

    let tasks = list.display_list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].label(), "Buy milk");
    assert!(!tasks[0].is_completed());
    assert!(!tasks[0].is_from_file());
}

#[test]
fn empty_label_is_rejected_without_writes() {
    let store = MemoryStore::new();
    let list = empty_list(&store);

    for label in ["", "   "] {
        let err = list.create(label).unwrap_err();
        assert!(matches!(err, TaskServiceError::InvalidInput(_)));
    }
    assert!(store.is_empty());
}

#[test]
fn toggle_missing_id_fails_and_leaves_store_unchanged() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);
    let before = store.snapshot();

    let err = list.toggle_completed("missing-id").unwrap_err();

    assert!(matches!(err, TaskServiceError::RecordNotFound(id) if id == "missing-id"));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn toggle_keeps_every_other_field() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);

    let toggled = list.toggle_completed("a").unwrap();

    assert!(toggled.is_completed());
    assert!(toggled.is_from_file());
    assert_eq!(toggled.label(), "X");
    assert_eq!(
        list.service().repo().get_task("a").unwrap().unwrap(),
        toggled
    );
}

#[test]
fn toggle_cannot_target_reserved_or_foreign_keys() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);
    store.set("loglevel:webpack-dev-server", "INFO").unwrap();
    let before = store.snapshot();

    assert!(matches!(
        list.toggle_completed(TOMBSTONE_KEY).unwrap_err(),
        TaskServiceError::RecordNotFound(_)
    ));
    assert!(matches!(
        list.toggle_completed("loglevel:webpack-dev-server")
            .unwrap_err(),
        TaskServiceError::RecordNotFound(_)
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn deleting_user_task_adds_no_tombstone() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);
    let task = list.create("mine").unwrap();

    assert_eq!(list.delete(task.id()).unwrap(), DeleteOutcome::Removed);

    let tombstones = list.service().repo().load_tombstones().unwrap().unwrap();
    assert!(tombstones.is_empty());
    assert!(list.service().repo().get_task(task.id()).unwrap().is_none());
}

#[test]
fn deleting_seed_task_tombstones_it() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);

    assert_eq!(list.delete("b").unwrap(), DeleteOutcome::Tombstoned);

    let tombstones = list.service().repo().load_tombstones().unwrap().unwrap();
    assert!(tombstones.contains("b"));
    assert!(list.service().repo().get_task("b").unwrap().is_none());
}

#[test]
fn retried_delete_of_tombstoned_seed_task_succeeds() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);
    list.delete("a").unwrap();

    assert_eq!(list.delete("a").unwrap(), DeleteOutcome::AlreadyTombstoned);
}

#[test]
fn delete_interrupted_after_tombstone_can_be_finished() {
    let store = MemoryStore::new();
    let list = seeded_list(&store);
    // Tombstone written, record not yet removed.
    store.set(TOMBSTONE_KEY, r#"["a"]"#).unwrap();

    assert_eq!(list.delete("a").unwrap(), DeleteOutcome::Tombstoned);
    assert!(list.service().repo().get_task("a").unwrap().is_none());
}

#[test]
fn mutations_persist_through_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let seed = || Ok(vec![TaskRecord::with_id("a", "X", false).unwrap()]);

    let created_id = {
        let conn = open_db(&path).unwrap();
        let list = TaskList::open(SqliteKvStore::try_new(&conn).unwrap(), seed()).unwrap();
        list.delete("a").unwrap();
        let task = list.create("persisted").unwrap();
        list.toggle_completed(task.id()).unwrap();
        task.id().to_string()
    };

    let conn = open_db(&path).unwrap();
    let list = TaskList::open(SqliteKvStore::try_new(&conn).unwrap(), seed()).unwrap();
    let tasks = list.display_list().unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id(), created_id);
    assert!(tasks[0].is_completed());
}

#[test]
fn stored_whitespace_label_record_stays_editable() {
    let store = MemoryStore::new();
    let list = empty_list(&store);
    store.set("u1", r#"{"id":"u1","label":"  "}"#).unwrap();

    let tasks = list.display_list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].label(), "  ");

    assert!(list.toggle_completed("u1").unwrap().is_completed());
    assert_eq!(list.delete("u1").unwrap(), DeleteOutcome::Removed);
    assert!(store.get("u1").unwrap().is_none());
}

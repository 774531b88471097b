use countdown_core::{DbError, EventStore};
use std::collections::HashSet;

const DATE: &str = "2020-08-25T09:30:00Z";

#[test]
fn file_store_is_created_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("My Countdown").join("events.sqlite3");
    let store = EventStore::new(&path);

    assert!(!path.exists());
    assert_eq!(store.path(), Some(path.as_path()));

    store.insert("title", "description", DATE).unwrap();
    assert!(store.is_open());
    assert!(path.exists());
}

#[test]
fn rows_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.sqlite3");

    let id = {
        let store = EventStore::new(&path);
        store.insert("title", "description", DATE).unwrap()
    };

    let reopened = EventStore::new(&path);
    let rows = reopened.select_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].title, "title");
    assert_eq!(rows[0].description, "description");
    assert_eq!(rows[0].date_text, DATE);
}

#[test]
fn failed_open_is_reported_to_every_caller() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    let store = EventStore::new(blocker.join("events.sqlite3"));

    assert!(matches!(store.open(), Err(DbError::Io { .. })));
    assert!(!store.is_open());

    // No sentinel id and no silent no-op: each operation surfaces the failure.
    assert!(store.insert("t", "d", DATE).is_err());
    assert!(store.select_all().is_err());
    assert!(store.update(1, "t", "d", DATE).is_err());
    assert!(store.delete(1).is_err());
}

#[test]
fn failed_open_is_retried_on_next_call() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    let store = EventStore::new(blocker.join("events.sqlite3"));
    assert!(store.open().is_err());

    std::fs::remove_file(&blocker).unwrap();
    store.open().unwrap();
    assert!(store.is_open());
}

#[test]
fn concurrent_first_use_opens_once() {
    let store = EventStore::in_memory();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let store = &store;
            scope.spawn(move || {
                store.insert(&format!("event {i}"), "d", DATE).unwrap();
            });
        }
    });

    // Every insert landed in the same in-memory database.
    let rows = store.select_all().unwrap();
    assert_eq!(rows.len(), 8);
    let ids = rows.iter().map(|row| row.id).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 8);
}

#[test]
fn select_all_returns_insertion_order_without_sorting() {
    let store = EventStore::in_memory();
    let late = store.insert("late", "d", "2030-01-01T00:00:00Z").unwrap();
    let early = store.insert("early", "d", "2000-01-01T00:00:00Z").unwrap();

    let ids = store
        .select_all()
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![late, early]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let store = EventStore::in_memory();
    store.insert("a", "d", DATE).unwrap();
    let last = store.insert("b", "d", DATE).unwrap();
    assert_eq!(store.delete(last).unwrap(), 1);

    let next = store.insert("c", "d", DATE).unwrap();
    assert!(next > last);
}

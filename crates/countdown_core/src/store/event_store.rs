//! Lazily opened SQLite store for raw event rows.
//!
//! # Responsibility
//! - Open-or-create the backing database on first use.
//! - Provide text-level CRUD over the `events` table.
//!
//! # Invariants
//! - Concurrent first use performs a single open; losers wait for the winner.
//! - A failed open leaves the store unopened, so the next call retries.
//! - Rows are returned in storage order; no ordering is applied here.
//! - Log lines carry ids and counts only, never user text.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::event::EventId;
use log::{debug, error, info, warn};
use once_cell::sync::OnceCell;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Raw `events` row with the date still in its stored text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date_text: String,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Explicitly owned handle to the events database.
///
/// Construction does no I/O; the database is opened by [`EventStore::open`]
/// or implicitly by the first row operation.
pub struct EventStore {
    location: Location,
    conn: OnceCell<Mutex<Connection>>,
}

impl EventStore {
    /// Creates a store backed by the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates a store backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: OnceCell::new(),
        }
    }

    /// Returns the backing file path, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path.as_path()),
            Location::Memory => None,
        }
    }

    /// Returns whether the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Opens the database and ensures the events table. No-op once open.
    ///
    /// # Errors
    /// - `DbError::Io` when the parent directory cannot be created.
    /// - `DbError::Sqlite` when the file cannot be opened or the table
    ///   cannot be ensured.
    pub fn open(&self) -> DbResult<()> {
        self.connection().map(|_| ())
    }

    /// Inserts one row and returns its assigned id.
    pub fn insert(&self, title: &str, description: &str, date_text: &str) -> DbResult<EventId> {
        let result = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO events (title, description, date) VALUES (?1, ?2, ?3);",
                params![title, description, date_text],
            )?;
            Ok(conn.last_insert_rowid())
        });
        match &result {
            Ok(id) => info!("event=store_insert module=store status=ok id={id}"),
            Err(err) => error!("event=store_insert module=store status=error error={err}"),
        }
        result
    }

    /// Returns every stored row in storage order.
    pub fn select_all(&self) -> DbResult<Vec<EventRow>> {
        let result = self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, title, description, date FROM events;")?;
            let rows = stmt.query_map([], |row| {
                Ok(EventRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    date_text: row.get(3)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        });
        match &result {
            Ok(rows) => debug!("event=store_select_all module=store status=ok rows={}", rows.len()),
            Err(err) => error!("event=store_select_all module=store status=error error={err}"),
        }
        result
    }

    /// Overwrites the row matching `id`. Returns the affected row count,
    /// `0` when no row matched.
    pub fn update(
        &self,
        id: EventId,
        title: &str,
        description: &str,
        date_text: &str,
    ) -> DbResult<usize> {
        let result = self.with_conn(|conn| {
            conn.execute(
                "UPDATE events SET title = ?1, description = ?2, date = ?3 WHERE id = ?4;",
                params![title, description, date_text, id],
            )
        });
        log_write("store_update", id, &result);
        result
    }

    /// Removes the row matching `id`. Returns the affected row count,
    /// `0` when no row matched.
    pub fn delete(&self, id: EventId) -> DbResult<usize> {
        let result =
            self.with_conn(|conn| conn.execute("DELETE FROM events WHERE id = ?1;", [id]));
        log_write("store_delete", id, &result);
        result
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> DbResult<T> {
        let conn = self.connection()?;
        Ok(f(&*conn)?)
    }

    fn connection(&self) -> DbResult<MutexGuard<'_, Connection>> {
        let cell = self.conn.get_or_try_init(|| {
            let conn = match &self.location {
                Location::File(path) => open_db(path)?,
                Location::Memory => open_db_in_memory()?,
            };
            Ok::<_, crate::db::DbError>(Mutex::new(conn))
        })?;
        // A panic while holding the lock cannot leave SQLite itself in a
        // torn state, so a poisoned guard is still usable.
        Ok(cell.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn log_write(event: &str, id: EventId, result: &DbResult<usize>) {
    match result {
        Ok(0) => warn!("event={event} module=store status=noop id={id} changed=0"),
        Ok(changed) => info!("event={event} module=store status=ok id={id} changed={changed}"),
        Err(err) => error!("event={event} module=store status=error id={id} error={err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::EventStore;

    #[test]
    fn construction_does_not_open() {
        let store = EventStore::in_memory();
        assert!(!store.is_open());
        assert!(store.path().is_none());
    }

    #[test]
    fn open_is_idempotent() {
        let store = EventStore::in_memory();
        store.open().unwrap();
        let id = store.insert("a", "b", "2020-08-25T09:30:00Z").unwrap();
        store.open().unwrap();
        assert!(store.is_open());

        let rows = store.select_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
    }

    #[test]
    fn first_operation_opens_implicitly() {
        let store = EventStore::in_memory();
        assert!(store.select_all().unwrap().is_empty());
        assert!(store.is_open());
    }

    #[test]
    fn update_and_delete_report_zero_for_missing_rows() {
        let store = EventStore::in_memory();
        assert_eq!(store.update(42, "t", "d", "2020-08-25T09:30:00Z").unwrap(), 0);
        assert_eq!(store.delete(42).unwrap(), 0);
    }
}

//! Event repository contracts and store-backed implementation.
//!
//! # Responsibility
//! - Present typed `Event` values over raw store rows.
//! - Own date (de)serialization between `DateTime<Utc>` and stored text.
//!
//! # Invariants
//! - Creation is a two-phase write: a placeholder row is inserted first and
//!   the user's edits arrive later through `save_event`.
//! - Read paths reject malformed stored dates instead of skipping rows.

use crate::db::DbError;
use crate::model::event::{Event, EventId, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::repo::date_codec::{format_date, parse_date, to_storage_precision, DateParseError};
use crate::store::{EventRow, EventStore};
use chrono::{DateTime, Utc};
use log::error;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// Store open, statement, or execution failure.
    #[error(transparent)]
    Db(#[from] DbError),
    /// A stored row carries date text this component never writes.
    #[error("corrupt date in event {id}: {source}")]
    CorruptDate {
        id: EventId,
        #[source]
        source: DateParseError,
    },
}

impl RepoError {
    /// Returns `true` for stored-data corruption, which callers must not
    /// retry or mask.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptDate { .. })
    }
}

/// Repository interface for countdown events.
pub trait EventRepository {
    /// Persists a placeholder event dated `now` and returns it.
    fn create_event(&self, now: DateTime<Utc>) -> RepoResult<Event>;
    /// Returns every event in storage order.
    ///
    /// A `RepoError::CorruptDate` here means the store holds date text this
    /// crate never writes; callers must treat it as fatal data corruption,
    /// not retry it or show a partial list.
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    /// Overwrites title, description and date by id. Returns `false` when
    /// no stored event matched.
    fn save_event(&self, event: &Event) -> RepoResult<bool>;
    /// Removes the event with `id` without reading any row. Returns `false`
    /// when nothing matched.
    fn delete_by_id(&self, id: EventId) -> RepoResult<bool>;
    /// Removes the event by its id.
    fn delete_event(&self, event: &Event) -> RepoResult<bool> {
        self.delete_by_id(event.id)
    }
}

/// `EventRepository` over an [`EventStore`].
pub struct SqliteEventRepository<'store> {
    store: &'store EventStore,
}

impl<'store> SqliteEventRepository<'store> {
    pub fn new(store: &'store EventStore) -> Self {
        Self { store }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, now: DateTime<Utc>) -> RepoResult<Event> {
        let date = to_storage_precision(now);
        let id = self
            .store
            .insert(DEFAULT_TITLE, DEFAULT_DESCRIPTION, &format_date(&date))?;
        Ok(Event::placeholder(id, date))
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.store
            .select_all()?
            .into_iter()
            .map(event_from_row)
            .collect()
    }

    fn save_event(&self, event: &Event) -> RepoResult<bool> {
        let changed = self.store.update(
            event.id,
            &event.title,
            &event.description,
            &format_date(&event.date),
        )?;
        Ok(changed > 0)
    }

    fn delete_by_id(&self, id: EventId) -> RepoResult<bool> {
        Ok(self.store.delete(id)? > 0)
    }
}

fn event_from_row(row: EventRow) -> RepoResult<Event> {
    let date = parse_date(&row.date_text).map_err(|source| {
        error!(
            "event=repo_list module=repo status=error error_code=corrupt_date id={}",
            row.id
        );
        RepoError::CorruptDate { id: row.id, source }
    })?;
    Ok(Event {
        id: row.id,
        title: row.title,
        description: row.description,
        date,
    })
}

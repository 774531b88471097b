//! Persistent event store.
//!
//! # Responsibility
//! - Own the single SQLite connection behind the event repository.
//! - Execute raw row-level SQL (insert, select-all, update, delete).
//!
//! # Invariants
//! - The connection is opened at most once per store instance.
//! - Every operation reports failure as a typed `DbError`.

pub mod event_store;

pub use event_store::{EventRow, EventStore};

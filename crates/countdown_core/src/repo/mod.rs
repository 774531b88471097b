//! Repository layer over the event store.
//!
//! # Responsibility
//! - Convert raw rows into typed `Event` values and back.
//! - Keep date encoding out of both the store and the callers.

pub mod date_codec;
pub mod event_repo;

//! Domain model for countdown events.
//!
//! # Invariants
//! - Every event is identified by a store-assigned `EventId`.
//! - All four event fields are always populated.

pub mod event;

//! Countdown ordering policy.
//!
//! # Responsibility
//! - Compute calendar-day distance between "now" and an event date.
//! - Order events upcoming-first, then most-recently-passed first.
//!
//! # Invariants
//! - Pure and deterministic for a given `(events, now)`; no I/O.

pub mod countdown;

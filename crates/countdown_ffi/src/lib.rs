//! Flutter-facing bindings for the countdown core.

pub mod api;

//! Core use-case services.
//!
//! # Responsibility
//! - Expose the collaborator-facing event operations to UI/FFI/CLI layers.
//! - Keep callers decoupled from storage and date encoding.

pub mod clock;
pub mod event_service;

//! Core logic for the countdown events app.
//!
//! Layers, leaves first: `db` (connection bootstrap) → `store` (raw rows)
//! → `repo` (typed events, date codec) → `ordering` (days-left policy) →
//! `service` (collaborator-facing use cases).

pub mod db;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;
pub mod store;

pub use db::{default_db_path, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::event::{Event, EventId, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use ordering::countdown::{countdowns, days_between, order_events, Countdown, CountdownStatus};
pub use repo::date_codec::{
    format_date, format_for_display, format_for_display_in, parse_date, DateParseError,
};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::event_service::EventService;
pub use store::{EventRow, EventStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

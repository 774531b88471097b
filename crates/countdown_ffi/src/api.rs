//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the event use cases to Dart via FRB as sync calls.
//! - Own the one process-wide `EventStore` the UI talks to.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Failures come back as `ok=false` envelopes, never as silent success.
//! - Dates cross the boundary as Unix epoch milliseconds.

use chrono::{DateTime, Local, Utc};
use countdown_core::db::DB_FILE_NAME;
use countdown_core::{
    core_version as core_version_inner, default_db_path,
    default_log_level as default_log_level_inner, format_for_display as format_for_display_inner,
    init_logging as init_logging_inner, Countdown, CountdownStatus, Event, EventId, EventService,
    EventStore, FixedClock, RepoResult, SqliteEventRepository, SystemClock,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "COUNTDOWN_DB_PATH";
static ENTRY_STORE: OnceLock<EventStore> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Returns the build-mode default log level (`debug` or `info`).
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Binds the process-wide store to `db_path` and opens it.
///
/// Call before any `event_*` function, typically with a path inside the
/// app's documents directory. Without it the store falls back to
/// `COUNTDOWN_DB_PATH`, then the platform documents directory.
///
/// # FFI contract
/// - Idempotent for the same path; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String) -> String {
    let requested = PathBuf::from(db_path.trim());
    if requested.as_os_str().is_empty() {
        return "db_path cannot be empty".to_string();
    }

    let store = ENTRY_STORE.get_or_init(|| EventStore::new(requested.clone()));
    match store.path() {
        Some(active) if active == requested => match store.open() {
            Ok(()) => String::new(),
            Err(err) => format!("init_store failed: {err}"),
        },
        active => format!(
            "store already initialized at `{}`; refusing to switch to `{}`",
            active.map(|p| p.display().to_string()).unwrap_or_default(),
            requested.display()
        ),
    }
}

/// One row of the countdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Event date in Unix epoch milliseconds.
    pub date_epoch_ms: i64,
    /// Short local date+time for display only.
    pub date_display: String,
    /// Calendar days from now; negative once passed.
    pub days_left: i64,
    /// `today|upcoming|past`.
    pub status: String,
}

/// Ordered list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    /// Items ordered upcoming-first, then most recently passed.
    pub items: Vec<EventItem>,
    pub message: String,
}

/// Generic action response envelope for event mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionResponse {
    /// Whether the operation took effect.
    pub ok: bool,
    /// Target or created event id, when known.
    pub event_id: Option<i64>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl EventActionResponse {
    fn success(message: impl Into<String>, event_id: EventId) -> Self {
        Self {
            ok: true,
            event_id: Some(event_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>, event_id: Option<EventId>) -> Self {
        Self {
            ok: false,
            event_id,
            message: message.into(),
        }
    }
}

/// Creates a placeholder event dated now (first phase of creation).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Returns the created id; the UI then edits and calls `event_save`.
#[flutter_rust_bridge::frb(sync)]
pub fn event_create() -> EventActionResponse {
    match with_service(|service| service.create_event()) {
        Ok(id) => EventActionResponse::success("Event created.", id),
        Err(err) => EventActionResponse::failure(format!("event_create failed: {err}"), None),
    }
}

/// Lists all events, ordered for display.
///
/// `now_epoch_ms` overrides the reference instant (device-local zone);
/// `None` uses the current time.
#[flutter_rust_bridge::frb(sync)]
pub fn event_list(now_epoch_ms: Option<i64>) -> EventListResponse {
    let result = match now_epoch_ms {
        None => with_service(|service| service.list_countdowns()),
        Some(ms) => match epoch_ms_to_utc(ms) {
            Some(now) => {
                let clock = FixedClock(now.with_timezone(&Local));
                let repo = SqliteEventRepository::new(entry_store());
                EventService::with_clock(repo, clock)
                    .list_countdowns()
                    .map_err(|err| err.to_string())
            }
            None => Err(format!("now_epoch_ms out of range: {ms}")),
        },
    };

    match result {
        Ok(countdowns) => {
            let items = countdowns.into_iter().map(to_event_item).collect::<Vec<_>>();
            let message = format!("Found {} event(s).", items.len());
            EventListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => EventListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("event_list failed: {err}"),
        },
    }
}

/// Saves user edits for one event (second phase of creation, or any edit).
///
/// # FFI contract
/// - `ok=false` when the id does not exist or the store fails.
#[flutter_rust_bridge::frb(sync)]
pub fn event_save(
    id: i64,
    title: String,
    description: String,
    date_epoch_ms: i64,
) -> EventActionResponse {
    let Some(date) = epoch_ms_to_utc(date_epoch_ms) else {
        return EventActionResponse::failure(
            format!("event_save failed: date_epoch_ms out of range: {date_epoch_ms}"),
            Some(id),
        );
    };
    let event = Event {
        id,
        title,
        description,
        date,
    };

    match with_service(|service| service.save_event(&event)) {
        Ok(true) => EventActionResponse::success("Event saved.", id),
        Ok(false) => {
            warn!("event=ffi_event_save module=ffi status=noop id={id}");
            EventActionResponse::failure(format!("event not found: {id}"), Some(id))
        }
        Err(err) => EventActionResponse::failure(format!("event_save failed: {err}"), Some(id)),
    }
}

/// Deletes one event by id.
///
/// # FFI contract
/// - Touches only the target row; other rows are never read.
/// - `ok=false` when no row had this id.
#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(id: i64) -> EventActionResponse {
    let result = with_service(|service| service.delete_by_id(id));

    match result {
        Ok(true) => EventActionResponse::success("Event deleted.", id),
        Ok(false) => EventActionResponse::failure(format!("event not found: {id}"), Some(id)),
        Err(err) => EventActionResponse::failure(format!("event_delete failed: {err}"), Some(id)),
    }
}

/// Renders an epoch-millisecond date as a short local date+time string.
///
/// Returns an empty string for out-of-range input.
#[flutter_rust_bridge::frb(sync)]
pub fn format_for_display(date_epoch_ms: i64) -> String {
    epoch_ms_to_utc(date_epoch_ms)
        .map(|date| format_for_display_inner(&date))
        .unwrap_or_default()
}

fn entry_store() -> &'static EventStore {
    ENTRY_STORE.get_or_init(|| EventStore::new(resolve_default_db_path()))
}

fn resolve_default_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    default_db_path().unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
}

fn with_service<T>(
    f: impl FnOnce(&EventService<SqliteEventRepository<'static>, SystemClock>) -> RepoResult<T>,
) -> Result<T, String> {
    let service = EventService::new(SqliteEventRepository::new(entry_store()));
    f(&service).map_err(|err| err.to_string())
}

fn epoch_ms_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

fn to_event_item(countdown: Countdown) -> EventItem {
    let Countdown {
        event,
        days_left,
        status,
    } = countdown;
    EventItem {
        id: event.id,
        date_epoch_ms: event.date.timestamp_millis(),
        date_display: format_for_display_inner(&event.date),
        title: event.title,
        description: event.description,
        days_left,
        status: status_label(status).to_string(),
    }
}

fn status_label(status: CountdownStatus) -> &'static str {
    match status {
        CountdownStatus::Today => "today",
        CountdownStatus::Upcoming => "upcoming",
        CountdownStatus::Past => "past",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, event_create, event_delete, event_list, event_save, format_for_display,
        init_logging, init_store,
    };
    use std::path::PathBuf;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    const NOON_2020_08_25_UTC_MS: i64 = 1_598_356_800_000;

    fn test_db_path() -> PathBuf {
        std::env::temp_dir()
            .join("countdown-ffi-test")
            .join("events.sqlite3")
    }

    fn ensure_test_store() {
        let error = init_store(test_db_path().to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn init_store_is_idempotent_and_rejects_other_paths() {
        ensure_test_store();
        ensure_test_store();
        let error = init_store("/somewhere/else/events.sqlite3".to_string());
        assert!(error.contains("refusing to switch"));
        assert!(!init_store("   ".to_string()).is_empty());
    }

    #[test]
    fn create_save_list_delete_flow() {
        ensure_test_store();
        let created = event_create();
        assert!(created.ok, "{}", created.message);
        let id = created.event_id.expect("create should return event_id");

        let date_ms = NOON_2020_08_25_UTC_MS + 3 * DAY_MS;
        let saved = event_save(id, "Concert".to_string(), "Row F".to_string(), date_ms);
        assert!(saved.ok, "{}", saved.message);

        let listed = event_list(Some(NOON_2020_08_25_UTC_MS));
        assert!(listed.ok, "{}", listed.message);
        let item = listed
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("saved event should be listed");
        assert_eq!(item.title, "Concert");
        assert_eq!(item.description, "Row F");
        assert_eq!(item.date_epoch_ms, date_ms);
        assert_eq!(item.status, "upcoming");
        assert_eq!(item.date_display, format_for_display(date_ms));

        let deleted = event_delete(id);
        assert!(deleted.ok, "{}", deleted.message);
        let listed = event_list(None);
        assert!(listed.items.iter().all(|item| item.id != id));
    }

    #[test]
    fn save_and_delete_of_missing_event_report_failure() {
        ensure_test_store();
        let saved = event_save(i64::MAX, "x".to_string(), "y".to_string(), 0);
        assert!(!saved.ok);
        assert!(saved.message.contains("not found"));

        let deleted = event_delete(i64::MAX);
        assert!(!deleted.ok);
        assert_eq!(deleted.event_id, Some(i64::MAX));
    }

    #[test]
    fn out_of_range_dates_are_rejected() {
        ensure_test_store();
        let saved = event_save(1, "x".to_string(), "y".to_string(), i64::MAX);
        assert!(!saved.ok);
        assert!(saved.message.contains("out of range"));

        let listed = event_list(Some(i64::MAX));
        assert!(!listed.ok);
        assert!(format_for_display(i64::MAX).is_empty());
    }
}

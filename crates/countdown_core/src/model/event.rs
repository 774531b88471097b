//! Countdown event record.
//!
//! # Invariants
//! - `id` is assigned by the store at creation and never changes.
//! - `date` is held in UTC; local projection happens only at display and
//!   ordering time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned row identifier.
pub type EventId = i64;

/// Title written by the first phase of event creation.
pub const DEFAULT_TITLE: &str = "New event";
/// Description written by the first phase of event creation.
pub const DEFAULT_DESCRIPTION: &str = "Event description";

/// A user-tracked countdown target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Event {
    /// Builds the placeholder event persisted before the user edits it.
    pub fn placeholder(id: EventId, date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            date,
        }
    }

    /// Returns whether title and description still hold creation defaults.
    pub fn is_placeholder(&self) -> bool {
        self.title == DEFAULT_TITLE && self.description == DEFAULT_DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
    use chrono::{TimeZone, Utc};

    #[test]
    fn placeholder_uses_default_texts() {
        let date = Utc.with_ymd_and_hms(2020, 8, 25, 9, 30, 0).unwrap();
        let event = Event::placeholder(7, date);
        assert_eq!(event.id, 7);
        assert_eq!(event.title, DEFAULT_TITLE);
        assert_eq!(event.description, DEFAULT_DESCRIPTION);
        assert_eq!(event.date, date);
        assert!(event.is_placeholder());
    }

    #[test]
    fn edited_event_is_not_placeholder() {
        let date = Utc.with_ymd_and_hms(2020, 8, 25, 9, 30, 0).unwrap();
        let mut event = Event::placeholder(1, date);
        event.title = "Birthday".to_string();
        assert!(!event.is_placeholder());
    }

    #[test]
    fn serializes_date_as_rfc3339() {
        let date = Utc.with_ymd_and_hms(2020, 8, 25, 9, 30, 0).unwrap();
        let event = Event::placeholder(1, date);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2020-08-25T09:30:00Z");
        assert_eq!(json["id"], 1);
    }
}

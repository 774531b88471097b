//! Days-left computation and list ordering.
//!
//! Ordering rule:
//! 1. `days_left >= 0` events come first, ascending (soonest first).
//! 2. `days_left < 0` events follow, descending (most recently passed first).
//! 3. Equal `days_left` keeps input order.

use crate::model::event::Event;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::cmp::Reverse;

/// Where an event sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownStatus {
    Today,
    Upcoming,
    Past,
}

impl CountdownStatus {
    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            0 => Self::Today,
            d if d > 0 => Self::Upcoming,
            _ => Self::Past,
        }
    }
}

/// An event annotated for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub event: Event,
    pub days_left: i64,
    pub status: CountdownStatus,
}

/// Counts calendar-day boundaries from `start` to `end`, both seen in
/// `start`'s time zone. Negative when `end` falls on an earlier day.
///
/// This is not elapsed time divided by 24h: 23:59 to 00:01 the next day is
/// one day.
pub fn days_between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Utc>) -> i64 {
    let end_local = end.with_timezone(&start.timezone());
    (end_local.date_naive() - start.date_naive()).num_days()
}

/// Orders events for display relative to `now`.
pub fn order_events<Tz: TimeZone>(events: Vec<Event>, now: &DateTime<Tz>) -> Vec<Event> {
    ordered_with_days(events, now)
        .into_iter()
        .map(|(_, event)| event)
        .collect()
}

/// Orders events like [`order_events`] and attaches days left and status.
pub fn countdowns<Tz: TimeZone>(events: Vec<Event>, now: &DateTime<Tz>) -> Vec<Countdown> {
    ordered_with_days(events, now)
        .into_iter()
        .map(|(days_left, event)| Countdown {
            event,
            days_left,
            status: CountdownStatus::from_days_left(days_left),
        })
        .collect()
}

fn ordered_with_days<Tz: TimeZone>(events: Vec<Event>, now: &DateTime<Tz>) -> Vec<(i64, Event)> {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = events
        .into_iter()
        .map(|event| (days_between(now, &event.date), event))
        .partition(|(days_left, _)| *days_left >= 0);

    // `sort_by_key` is stable, which keeps ties in input order.
    upcoming.sort_by_key(|(days_left, _)| *days_left);
    past.sort_by_key(|(days_left, _)| Reverse(*days_left));

    upcoming.extend(past);
    upcoming
}

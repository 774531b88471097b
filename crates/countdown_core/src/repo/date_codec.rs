//! Event date encodings.
//!
//! # Responsibility
//! - Persisted form: RFC 3339, whole seconds, UTC `Z` suffix.
//! - Display form: short day/month/year plus 24h time, never parsed back.
//!
//! # Invariants
//! - `parse_date(&format_date(d)) == d` whenever `d` has no sub-second part.
//! - The persisted form is the only date text the store ever receives.

use chrono::{DateTime, Local, SecondsFormat, SubsecRound, TimeZone, Utc};
use std::fmt::Display;
use thiserror::Error;

const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Stored date text that is not a valid RFC 3339 timestamp.
#[derive(Debug, Error)]
#[error("invalid stored date `{value}`: {source}")]
pub struct DateParseError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Drops the sub-second part so a value survives a storage round trip.
pub fn to_storage_precision(date: DateTime<Utc>) -> DateTime<Utc> {
    date.trunc_subsecs(0)
}

/// Encodes a date for persistence.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decodes persisted date text. Any RFC 3339 offset is accepted and
/// normalized to UTC.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, DateParseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| DateParseError {
            value: text.to_string(),
            source,
        })
}

/// Renders a date for humans in the device-local time zone.
pub fn format_for_display(date: &DateTime<Utc>) -> String {
    format_for_display_in(date, &Local)
}

/// Renders a date for humans in `tz`.
pub fn format_for_display_in<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

//! Source of the current instant for use-case services.

use chrono::{DateTime, Local, TimeZone};

/// Supplies "now" in the time zone used for calendar-day math and display.
///
/// The zone is kept as a full `TimeZone`, not a fixed offset, so event dates
/// on the other side of a daylight-saving change land on their own local day.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the device-local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to one instant in a given zone.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}

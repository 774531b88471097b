//! Event use-case service.
//!
//! # Responsibility
//! - Provide create/list/order/save/delete/display entry points.
//! - Supply the current instant from an injected [`Clock`].
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Listing is unordered; ordering is an explicit, separate step.

use crate::model::event::{Event, EventId};
use crate::ordering::countdown::{self, Countdown};
use crate::repo::date_codec;
use crate::repo::event_repo::{EventRepository, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use chrono::{DateTime, TimeZone, Utc};
use log::{error, info};
use std::fmt::Display;

/// Use-case façade over an event repository.
pub struct EventService<R: EventRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service reading time from the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: EventRepository, C: Clock> EventService<R, C> {
    /// Creates a service with a caller-provided clock.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// First phase of creation: stores a placeholder dated now and returns
    /// its id. The caller edits the event and calls [`Self::save_event`].
    pub fn create_event(&self) -> RepoResult<EventId> {
        self.create_placeholder().map(|event| event.id)
    }

    /// Same as [`Self::create_event`] but returns the stored placeholder.
    pub fn create_placeholder(&self) -> RepoResult<Event> {
        let now = self.clock.now().with_timezone(&Utc);
        match self.repo.create_event(now) {
            Ok(event) => {
                info!("event=event_create module=service status=ok id={}", event.id);
                Ok(event)
            }
            Err(err) => {
                error!("event=event_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Lists all events in storage order.
    pub fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.repo.list_events()
    }

    /// Finds one event by id.
    pub fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        Ok(self
            .repo
            .list_events()?
            .into_iter()
            .find(|event| event.id == id))
    }

    /// Orders `events` relative to `now`.
    pub fn order_events<Tz: TimeZone>(&self, events: Vec<Event>, now: &DateTime<Tz>) -> Vec<Event> {
        countdown::order_events(events, now)
    }

    /// Lists all events ordered relative to the clock's current instant.
    pub fn list_ordered(&self) -> RepoResult<Vec<Event>> {
        let events = self.repo.list_events()?;
        Ok(countdown::order_events(events, &self.clock.now()))
    }

    /// Lists ordered events with days left and status attached.
    pub fn list_countdowns(&self) -> RepoResult<Vec<Countdown>> {
        let events = self.repo.list_events()?;
        Ok(countdown::countdowns(events, &self.clock.now()))
    }

    /// Second phase of creation, and every later edit.
    pub fn save_event(&self, event: &Event) -> RepoResult<bool> {
        self.repo.save_event(event)
    }

    pub fn delete_event(&self, event: &Event) -> RepoResult<bool> {
        self.repo.delete_event(event)
    }

    /// Deletes by id alone; works even when other rows fail to parse.
    pub fn delete_by_id(&self, id: EventId) -> RepoResult<bool> {
        self.repo.delete_by_id(id)
    }

    /// Renders `date` for humans in the clock's time zone.
    pub fn format_for_display(&self, date: &DateTime<Utc>) -> String
    where
        <C::Tz as TimeZone>::Offset: Display,
    {
        date_codec::format_for_display_in(date, &self.clock.now().timezone())
    }
}

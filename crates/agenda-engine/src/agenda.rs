//! The event store and its availability query.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::availability::{self, Availability};
use crate::error::Result;
use crate::event::Event;
use crate::interval::Interval;

/// An append-only, ordered collection of declared events.
///
/// Registration takes `&mut self` and queries take `&self`, so a query always
/// observes a consistent snapshot of the events registered before it.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    events: Vec<Event>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an opening (`opening = true`) or busy event.
    ///
    /// Recurring events repeat every seven days, in both directions, from the
    /// given `start`/`end`.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidInterval` if `start > end`. The agenda is
    /// left untouched.
    pub fn add_event(
        &mut self,
        opening: bool,
        recurring: bool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        let event = Event::new(opening, recurring, start, end)?;
        debug!(opening, recurring, %start, %end, "registered event");
        self.events.push(event);
        Ok(())
    }

    /// Registered events, in registration order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Compute the available slots between `from` and `to`, both inclusive.
    ///
    /// Slots are sorted by start, never overlap, never have zero length and
    /// lie within `[from, to]`. A query with `from == to` yields nothing.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidInterval` if `from > to`.
    pub fn get_availabilities(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Availability>> {
        let range = Interval::query(from, to)?;
        let open = availability::resolve(&self.events, range);
        Ok(availability::to_availabilities(&open, from))
    }
}

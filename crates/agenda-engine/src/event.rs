//! Declared agenda events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::interval::Interval;

/// An opening or busy declaration, optionally repeating every week.
///
/// Events are immutable once created; corrections are modelled as new events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    opening: bool,
    recurring: bool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(skip)]
    span: Interval,
}

impl Event {
    /// Create an event, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidInterval` when `start` is after `end`.
    pub fn new(
        opening: bool,
        recurring: bool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        let span = Interval::from_datetimes(start, end)?;
        Ok(Self {
            opening,
            recurring,
            start,
            end,
            span,
        })
    }

    /// True for availability-granting events, false for busy ones.
    pub fn is_opening(&self) -> bool {
        self.opening
    }

    /// True when the event repeats every seven days from its anchor.
    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The event's span in epoch milliseconds.
    pub fn interval(&self) -> Interval {
        self.span
    }
}

//! # agenda-engine
//!
//! Deterministic availability resolution for agendas built from opening and
//! busy events, some of which repeat every week.
//!
//! ```rust
//! use agenda_engine::Agenda;
//! use chrono::{TimeZone, Utc};
//!
//! let mut agenda = Agenda::new();
//! let day = |h, m| Utc.with_ymd_and_hms(2022, 7, 2, h, m, 0).unwrap();
//!
//! agenda.add_event(true, false, day(8, 0), day(18, 0)).unwrap();
//! agenda.add_event(false, false, day(9, 30), day(11, 30)).unwrap();
//!
//! let slots = agenda.get_availabilities(day(0, 0), day(23, 0)).unwrap();
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].end_date, day(9, 30));
//! assert_eq!(slots[1].start_date, day(11, 30));
//! ```
//!
//! ## Modules
//!
//! - [`interval`] -- overlap, intersection, subtraction and merging of intervals
//! - [`recurrence`] -- weekly templates → concrete occurrences inside a range
//! - [`availability`] -- open-minus-busy resolution over a query range
//! - [`agenda`] -- the event store and its public query
//! - [`event`] -- declared events
//! - [`error`] -- Error types

pub mod agenda;
pub mod availability;
pub mod error;
pub mod event;
pub mod interval;
pub mod recurrence;

pub use agenda::Agenda;
pub use availability::{resolve, Availability};
pub use error::AgendaError;
pub use event::Event;
pub use interval::{
    is_time_in_range, overlap_interval, ranges_overlap, subtract, Instant, Interval,
};
pub use recurrence::{expand_weekly, WEEK_MILLIS};

//! # slot-engine
//!
//! Deterministic meeting slot discovery and scoring.
//!
//! Given each participant's busy intervals, a search window and a meeting
//! duration, the engine enumerates every feasible slot on a fixed grid and
//! picks the best one by an additive score. All functions are pure over their
//! inputs except [`schedule_meeting`], which reads and appends through a
//! [`CalendarStore`] transaction.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open time spans and minute arithmetic
//! - [`policy`] — Grid step, exclusion windows, bounds and scoring weights
//! - [`finder`] — Enumerate feasible candidate slots
//! - [`scorer`] — Score candidates and pick the best (earliest wins ties)
//! - [`store`] — Calendar store capability and the in-memory implementation
//! - [`booking`] — Discovery, selection and commit as one transaction
//! - [`temporal`] — RFC 3339 parsing and display-zone formatting
//! - [`error`] — Error types

pub mod booking;
pub mod error;
pub mod finder;
pub mod interval;
pub mod policy;
pub mod scorer;
pub mod store;
pub mod temporal;

pub use booking::{schedule_meeting, Booking, MeetingRequest, DEFAULT_MEETING_TITLE};
pub use error::SchedulerError;
pub use finder::{find_candidates, BusyMap};
pub use interval::{BusyInterval, SearchWindow, TimeSlot, Timestamp};
pub use policy::{ScoreWeights, SlotPolicy, MAX_WINDOW_DAYS_LIMIT};
pub use scorer::{score_candidates, score_slot, select_best, ScoredSlot};
pub use store::{CalendarEvent, CalendarStore, CalendarTxn, InMemoryCalendar};

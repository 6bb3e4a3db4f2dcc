//! Calendar storage capability.
//!
//! Discovery reads each participant's busy intervals and booking appends one
//! event per participant. Both must happen inside a single [`CalendarTxn`] so
//! that two concurrent bookings for overlapping participants cannot both pass
//! discovery against the same snapshot. A store guarantees that at most one
//! transaction is open at a time for any participant it covers.

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};

use crate::interval::{BusyInterval, TimeSlot, Timestamp};

/// A committed calendar entry for a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(alias = "userId")]
    pub participant_id: String,
    #[serde(alias = "startTime")]
    pub start: Timestamp,
    #[serde(alias = "endTime")]
    pub end: Timestamp,
}

impl CalendarEvent {
    pub fn interval(&self) -> BusyInterval {
        TimeSlot::new(self.start, self.end)
    }
}

/// Read-decide-write unit over a calendar. Dropping it releases exclusivity.
pub trait CalendarTxn {
    /// Busy intervals of `participant`, in insertion order. Unknown
    /// participants have none.
    fn busy_intervals(&self, participant: &str) -> Vec<BusyInterval>;

    fn append(&mut self, event: CalendarEvent);
}

/// A calendar that can serialize scheduling transactions.
pub trait CalendarStore: Send + Sync {
    /// Open an exclusive transaction. Blocks while another one is open.
    fn begin(&self) -> Box<dyn CalendarTxn + '_>;

    /// Events of `participant` touching `[start, end]`, ordered by start.
    ///
    /// Inclusive on both ends: an event ending exactly at `start` or starting
    /// exactly at `end` is returned.
    fn events_overlapping(
        &self,
        participant: &str,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Vec<CalendarEvent>;
}

/// Append-only in-process calendar guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<CalendarEvent>>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Copy of every stored event, in insertion order.
    pub fn snapshot(&self) -> Vec<CalendarEvent> {
        self.events.lock().clone()
    }
}

struct InMemoryTxn<'a> {
    events: MutexGuard<'a, Vec<CalendarEvent>>,
}

impl CalendarTxn for InMemoryTxn<'_> {
    fn busy_intervals(&self, participant: &str) -> Vec<BusyInterval> {
        self.events
            .iter()
            .filter(|e| e.participant_id == participant)
            .map(CalendarEvent::interval)
            .collect()
    }

    fn append(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }
}

impl CalendarStore for InMemoryCalendar {
    fn begin(&self) -> Box<dyn CalendarTxn + '_> {
        Box::new(InMemoryTxn {
            events: self.events.lock(),
        })
    }

    fn events_overlapping(
        &self,
        participant: &str,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Vec<CalendarEvent> {
        let mut found: Vec<CalendarEvent> = self
            .events
            .lock()
            .iter()
            .filter(|e| e.participant_id == participant && e.start <= *end && e.end >= *start)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.start);
        found
    }
}

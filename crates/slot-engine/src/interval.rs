//! Half-open time spans shared by discovery and scoring.
//!
//! Timestamps keep the UTC offset they were written with. The civil clock of a
//! slot (its "local" hour and day) is read in that offset, so a window given as
//! `2025-08-02T09:00:00+05:30` enumerates slots on the +05:30 wall clock.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// An instant together with the offset it was expressed in.
pub type Timestamp = DateTime<FixedOffset>;

/// A span `[start, end)` of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// A span during which a participant is already committed.
pub type BusyInterval = TimeSlot;

/// Bounds within which candidate starts are enumerated.
pub type SearchWindow = TimeSlot;

impl TimeSlot {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// The slot of length `duration` beginning at `start`.
    pub fn starting_at(start: Timestamp, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Half-open overlap: spans that merely touch do not overlap.
    ///
    /// ```
    /// use chrono::DateTime;
    /// use slot_engine::TimeSlot;
    ///
    /// let t = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
    /// let a = TimeSlot::new(t("2025-08-02T10:00:00Z"), t("2025-08-02T11:00:00Z"));
    /// let b = TimeSlot::new(t("2025-08-02T11:00:00Z"), t("2025-08-02T12:00:00Z"));
    /// assert!(!a.overlaps(&b));
    /// ```
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Signed whole minutes from `earlier` to `later`, truncated toward zero.
pub fn minutes_between(later: &Timestamp, earlier: &Timestamp) -> i64 {
    (*later - *earlier).num_minutes()
}

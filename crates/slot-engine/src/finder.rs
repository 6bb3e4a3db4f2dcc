//! Candidate slot discovery.
//!
//! Walks a fixed grid across the search window and keeps every start where
//! the slot is free for all participants and clear of the exclusion rules.
//! Output order is generation order (ascending start), which the scorer's
//! tie-break depends on.

use std::collections::HashMap;

use chrono::{Duration, Timelike};

use crate::error::{Result, SchedulerError};
use crate::interval::{BusyInterval, SearchWindow, TimeSlot};
use crate::policy::SlotPolicy;

/// Busy intervals keyed by participant id. Absent participants are
/// unconstrained.
pub type BusyMap = HashMap<String, Vec<BusyInterval>>;

/// Enumerate every feasible slot of length `duration` inside `window`.
///
/// Starts are `window.start + k * step` for as long as the slot still ends at
/// or before `window.end`. A slot is kept when it overlaps no busy interval of
/// any listed participant, does not overlap the daily lunch window, and does
/// not start in the excluded hour.
///
/// An inverted window or a window shorter than `duration` yields an empty
/// list; that is the normal "nothing fits" outcome, not an error.
///
/// # Errors
///
/// - [`SchedulerError::InvalidDuration`] if `duration` is not positive.
/// - [`SchedulerError::InvalidPolicy`] if the policy fails validation.
/// - [`SchedulerError::WindowTooLarge`] if the window spans more than
///   `policy.max_window_days`.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Duration};
/// use slot_engine::{find_candidates, BusyMap, SearchWindow, SlotPolicy};
///
/// let t = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
/// let window = SearchWindow::new(t("2025-08-02T09:00:00Z"), t("2025-08-02T10:00:00Z"));
/// let slots = find_candidates(
///     &["u1".to_string()],
///     &BusyMap::new(),
///     &window,
///     Duration::minutes(30),
///     &SlotPolicy::default(),
/// )
/// .unwrap();
/// assert_eq!(slots.len(), 3); // 09:00, 09:15, 09:30
/// ```
pub fn find_candidates(
    participants: &[String],
    busy: &BusyMap,
    window: &SearchWindow,
    duration: Duration,
    policy: &SlotPolicy,
) -> Result<Vec<TimeSlot>> {
    if duration <= Duration::zero() {
        return Err(SchedulerError::InvalidDuration(format!(
            "duration must be positive, got {} minutes",
            duration.num_minutes()
        )));
    }
    policy.validate()?;

    if window.end < window.start {
        return Ok(Vec::new());
    }

    let span = window.end - window.start;
    if span > policy.max_window() {
        return Err(SchedulerError::WindowTooLarge {
            requested_minutes: span.num_minutes(),
            limit_minutes: policy.max_window().num_minutes(),
        });
    }
    if duration > span {
        return Ok(Vec::new());
    }

    let step = policy.step();
    let mut candidates = Vec::new();
    let mut start = window.start;

    while let Some(end) = start
        .checked_add_signed(duration)
        .filter(|end| *end <= window.end)
    {
        let slot = TimeSlot::new(start, end);
        if is_feasible(&slot, participants, busy, policy) {
            candidates.push(slot);
        }
        match start.checked_add_signed(step) {
            Some(next) => start = next,
            None => break,
        }
    }

    Ok(candidates)
}

/// Whether `slot` passes every rule applied by [`find_candidates`].
pub fn is_feasible(
    slot: &TimeSlot,
    participants: &[String],
    busy: &BusyMap,
    policy: &SlotPolicy,
) -> bool {
    !conflicts_with_participants(slot, participants, busy)
        && !overlaps_lunch(slot, policy)
        && !starts_in_excluded_hour(slot, policy)
}

/// True if any participant has a busy interval overlapping `slot`.
pub fn conflicts_with_participants(
    slot: &TimeSlot,
    participants: &[String],
    busy: &BusyMap,
) -> bool {
    participants.iter().any(|id| {
        busy.get(id)
            .is_some_and(|intervals| intervals.iter().any(|b| slot.overlaps(b)))
    })
}

/// True if `slot` overlaps the lunch window on the civil day it starts.
pub fn overlaps_lunch(slot: &TimeSlot, policy: &SlotPolicy) -> bool {
    let offset = *slot.start.offset();
    let day = slot.start.date_naive();
    let lunch_start = day.and_time(policy.lunch_start);
    let lunch_end = day.and_time(policy.lunch_end);

    let start = slot.start.naive_local();
    let end = slot.end.with_timezone(&offset).naive_local();

    start < lunch_end && end > lunch_start
}

/// True if the civil start hour of `slot` is the excluded hour.
///
/// Kept separate from [`overlaps_lunch`]: a 12:00-12:30 slot clears the lunch
/// window but is still dropped here.
pub fn starts_in_excluded_hour(slot: &TimeSlot, policy: &SlotPolicy) -> bool {
    policy.excluded_start_hour == Some(slot.start.hour())
}

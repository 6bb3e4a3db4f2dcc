//! Meeting booking: discovery, selection and commit as one unit.

use std::collections::HashSet;

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::finder::{find_candidates, BusyMap};
use crate::interval::{SearchWindow, TimeSlot};
use crate::policy::SlotPolicy;
use crate::scorer::select_best;
use crate::store::{CalendarEvent, CalendarStore};

pub const DEFAULT_MEETING_TITLE: &str = "New Meeting";

/// A validated request to book one meeting.
#[derive(Debug, Clone)]
pub struct MeetingRequest {
    pub participants: Vec<String>,
    pub duration: Duration,
    pub window: SearchWindow,
    pub title: Option<String>,
}

impl MeetingRequest {
    pub fn new(participants: Vec<String>, duration: Duration, window: SearchWindow) -> Self {
        Self {
            participants,
            duration,
            window,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reject input the engine must never see.
    pub fn validate(&self) -> Result<()> {
        if self.participants.is_empty() {
            return Err(SchedulerError::InvalidRequest(
                "at least one participant is required".to_string(),
            ));
        }
        if self.participants.iter().any(|p| p.trim().is_empty()) {
            return Err(SchedulerError::InvalidRequest(
                "participant ids must not be blank".to_string(),
            ));
        }
        if self.duration <= Duration::zero() {
            return Err(SchedulerError::InvalidDuration(format!(
                "duration must be positive, got {} minutes",
                self.duration.num_minutes()
            )));
        }
        Ok(())
    }

    /// Participants in request order with repeats removed.
    pub fn distinct_participants(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.participants
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect()
    }
}

/// The outcome of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub meeting_id: String,
    pub title: String,
    pub participant_ids: Vec<String>,
    pub slot: TimeSlot,
}

/// Find, pick and record a slot for every participant of `request`.
///
/// The store transaction is held from the busy-interval read until the new
/// events are appended, so concurrent calls on the same store never book
/// overlapping slots for a shared participant.
///
/// # Errors
///
/// - Validation errors from [`MeetingRequest::validate`] and
///   [`find_candidates`].
/// - [`SchedulerError::NoAvailableSlot`] if no candidate survives discovery.
pub fn schedule_meeting(
    store: &dyn CalendarStore,
    request: &MeetingRequest,
    policy: &SlotPolicy,
) -> Result<Booking> {
    request.validate()?;
    let participants = request.distinct_participants();

    let mut txn = store.begin();

    let busy: BusyMap = participants
        .iter()
        .map(|id| (id.clone(), txn.busy_intervals(id)))
        .collect();

    let candidates = find_candidates(
        &participants,
        &busy,
        &request.window,
        request.duration,
        policy,
    )?;
    debug!(
        candidates = candidates.len(),
        participants = participants.len(),
        "slot discovery complete"
    );

    if candidates.is_empty() {
        return Err(SchedulerError::NoAvailableSlot);
    }

    let slot = select_best(&candidates, &participants, &busy, &policy.weights)?;
    let title = request
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_MEETING_TITLE.to_string());

    for id in &participants {
        txn.append(CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: title.clone(),
            participant_id: id.clone(),
            start: slot.start,
            end: slot.end,
        });
    }
    drop(txn);

    let booking = Booking {
        meeting_id: Uuid::new_v4().to_string(),
        title,
        participant_ids: request.participants.clone(),
        slot,
    };
    info!(
        meeting_id = %booking.meeting_id,
        start = %slot.start,
        end = %slot.end,
        "meeting booked"
    );
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Timestamp;
    use crate::store::{CalendarTxn, InMemoryCalendar};
    use chrono::DateTime;

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn window(start: &str, end: &str) -> SearchWindow {
        TimeSlot::new(ts(start), ts(end))
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn existing(who: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: format!("seed-{who}-{start}"),
            title: "Existing Meeting".to_string(),
            participant_id: who.to_string(),
            start: ts(start),
            end: ts(end),
        }
    }

    #[test]
    fn test_books_earliest_clean_slot() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1", "u2"]),
            Duration::minutes(60),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        let booking = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();

        assert_eq!(booking.slot.start, ts("2025-08-02T09:00:00Z"));
        assert_eq!(booking.slot.end, ts("2025-08-02T10:00:00Z"));
        assert_eq!(booking.title, DEFAULT_MEETING_TITLE);
        assert_eq!(booking.participant_ids, ids(&["u1", "u2"]));
        assert_eq!(store.len(), 2);
        assert!(Uuid::parse_str(&booking.meeting_id).is_ok());
    }

    #[test]
    fn test_booking_blocks_the_slot_for_the_next_request() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1"]),
            Duration::minutes(60),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        let first = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        let second = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        assert!(!first.slot.overlaps(&second.slot));
        // 10:00 is back-to-back (+10), 10:15 has a short gap (+5), 10:30 is clean.
        assert_eq!(second.slot.start, ts("2025-08-02T10:30:00Z"));
    }

    #[test]
    fn test_existing_events_steer_selection() {
        let store = InMemoryCalendar::with_events(vec![existing(
            "u1",
            "2025-08-02T09:00:00Z",
            "2025-08-02T11:00:00Z",
        )]);
        let req = MeetingRequest::new(
            ids(&["u1", "u2"]),
            Duration::minutes(30),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        let booking = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        assert_eq!(booking.slot.start, ts("2025-08-02T11:30:00Z"));
    }

    #[test]
    fn test_no_slot_is_conflict_and_nothing_written() {
        let store = InMemoryCalendar::with_events(vec![existing(
            "u1",
            "2025-08-02T09:00:00Z",
            "2025-08-02T17:00:00Z",
        )]);
        let req = MeetingRequest::new(
            ids(&["u1"]),
            Duration::minutes(30),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        let err = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap_err();
        assert_eq!(err, SchedulerError::NoAvailableSlot);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_window_narrower_than_duration_is_conflict() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1"]),
            Duration::minutes(90),
            window("2025-08-02T09:00:00Z", "2025-08-02T10:00:00Z"),
        );
        let err = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap_err();
        assert_eq!(err, SchedulerError::NoAvailableSlot);
    }

    #[test]
    fn test_duplicate_participants_booked_once() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1", "u1", "u2"]),
            Duration::minutes(30),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        let booking = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(booking.participant_ids.len(), 3);
    }

    #[test]
    fn test_custom_title_recorded() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1"]),
            Duration::minutes(30),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        )
        .with_title("Design review");
        let booking = schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        assert_eq!(booking.title, "Design review");
        assert!(store.snapshot().iter().all(|e| e.title == "Design review"));
    }

    #[test]
    fn test_validation_errors() {
        let store = InMemoryCalendar::new();
        let w = window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z");

        let empty = MeetingRequest::new(vec![], Duration::minutes(30), w);
        assert!(matches!(
            schedule_meeting(&store, &empty, &SlotPolicy::default()),
            Err(SchedulerError::InvalidRequest(_))
        ));

        let blank = MeetingRequest::new(ids(&["u1", "  "]), Duration::minutes(30), w);
        assert!(matches!(
            schedule_meeting(&store, &blank, &SlotPolicy::default()),
            Err(SchedulerError::InvalidRequest(_))
        ));

        let zero = MeetingRequest::new(ids(&["u1"]), Duration::zero(), w);
        assert!(matches!(
            schedule_meeting(&store, &zero, &SlotPolicy::default()),
            Err(SchedulerError::InvalidDuration(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_released_after_booking() {
        let store = InMemoryCalendar::new();
        let req = MeetingRequest::new(
            ids(&["u1"]),
            Duration::minutes(30),
            window("2025-08-02T09:00:00Z", "2025-08-02T17:00:00Z"),
        );
        schedule_meeting(&store, &req, &SlotPolicy::default()).unwrap();
        // A fresh transaction must be obtainable without blocking.
        let txn = store.begin();
        assert_eq!(txn.busy_intervals("u1").len(), 1);
    }
}

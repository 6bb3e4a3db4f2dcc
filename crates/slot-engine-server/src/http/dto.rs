//! Request and response bodies.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::temporal::format_in_zone;
use slot_engine::{Booking, CalendarEvent};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeDto {
    pub start: String,
    pub end: String,
}

/// Body of `POST /schedule`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub participant_ids: Vec<String>,
    pub duration_minutes: i64,
    pub time_range: TimeRangeDto,
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of a `201 Created` from `POST /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    pub meeting_id: String,
    pub title: String,
    pub participant_ids: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

impl MeetingResponse {
    pub fn from_booking(booking: Booking, tz: &Tz) -> Self {
        Self {
            start_time: format_in_zone(&booking.slot.start, tz),
            end_time: format_in_zone(&booking.slot.end, tz),
            meeting_id: booking.meeting_id,
            title: booking.title,
            participant_ids: booking.participant_ids,
        }
    }
}

/// Query string of `GET /users/{userId}/calendar`. Both fields are required;
/// they are optional here so a missing one becomes our own 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventDto {
    pub fn from_event(event: CalendarEvent, tz: &Tz) -> Self {
        Self {
            start_time: format_in_zone(&event.start, tz),
            end_time: format_in_zone(&event.end, tz),
            id: event.id,
            title: event.title,
            user_id: event.participant_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub user_id: String,
    pub start: String,
    pub end: String,
    pub events: Vec<EventDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

//! HTTP handlers for the REST API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Duration;
use slot_engine::temporal::{format_in_zone, parse_rfc3339};
use slot_engine::{schedule_meeting, MeetingRequest, TimeSlot};

use super::dto::{
    CalendarQuery, CalendarResponse, EventDto, HealthResponse, MeetingResponse, ScheduleRequest,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /schedule
///
/// Find the best common slot for the participants inside the time range and
/// book it for each of them.
pub async fn schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MeetingResponse>), AppError> {
    let Json(body) =
        payload.map_err(|e| AppError::BadRequest(format!("Invalid request: {}", e.body_text())))?;

    let start = parse_rfc3339(&body.time_range.start)?;
    let end = parse_rfc3339(&body.time_range.end)?;
    let duration = Duration::try_minutes(body.duration_minutes)
        .filter(|d| *d > Duration::zero())
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "durationMinutes must be positive, got {}",
                body.duration_minutes
            ))
        })?;

    let mut request =
        MeetingRequest::new(body.participant_ids, duration, TimeSlot::new(start, end));
    request.title = Some(
        body.title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| state.default_title.clone()),
    );
    request.validate()?;

    let store = state.store.clone();
    let policy = state.policy.clone();
    let booking =
        tokio::task::spawn_blocking(move || schedule_meeting(store.as_ref(), &request, &policy))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok((
        StatusCode::CREATED,
        Json(MeetingResponse::from_booking(booking, &state.display_tz)),
    ))
}

/// GET /users/{user_id}/calendar?start=..&end=..
///
/// Events of one user touching `[start, end]`.
pub async fn user_calendar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> HandlerResult<CalendarResponse> {
    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("userId is required".to_string()));
    }
    let Query(query) =
        query.map_err(|e| AppError::BadRequest(format!("Invalid query: {}", e.body_text())))?;

    let (Some(start), Some(end)) = (query.start, query.end) else {
        return Err(AppError::BadRequest(
            "start and end query params are required".to_string(),
        ));
    };
    let start = parse_rfc3339(&start)
        .map_err(|_| AppError::BadRequest("Invalid start date format".to_string()))?;
    let end = parse_rfc3339(&end)
        .map_err(|_| AppError::BadRequest("Invalid end date format".to_string()))?;

    let tz = state.display_tz;
    let store = state.store.clone();
    let participant = user_id.clone();
    let events = tokio::task::spawn_blocking(move || {
        store.events_overlapping(&participant, &start, &end)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    .into_iter()
    .map(|e| EventDto::from_event(e, &tz))
    .collect();

    Ok(Json(CalendarResponse {
        user_id,
        start: format_in_zone(&start, &tz),
        end: format_in_zone(&end, &tz),
        events,
    }))
}

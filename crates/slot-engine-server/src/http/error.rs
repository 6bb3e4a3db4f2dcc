//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use slot_engine::SchedulerError;
use tracing::{debug, error, info};

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid request
    BadRequest(String),
    /// No slot satisfies every participant
    Conflict(String),
    /// Broken internal contract
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => {
                debug!(%msg, "rejected request");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Conflict(msg) => {
                info!(%msg, "scheduling conflict");
                (StatusCode::CONFLICT, msg)
            }
            AppError::Internal(msg) => {
                error!(%msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<SchedulerError> for AppError {
    fn from(err: SchedulerError) -> Self {
        let msg = err.to_string();
        match err {
            SchedulerError::NoAvailableSlot => AppError::Conflict(msg),
            ref e if e.is_validation() => AppError::BadRequest(msg),
            _ => AppError::Internal(msg),
        }
    }
}

//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Search window spans {requested_minutes} minutes, limit is {limit_minutes}")]
    WindowTooLarge {
        requested_minutes: i64,
        limit_minutes: i64,
    },

    #[error("No available time slot found for all participants.")]
    NoAvailableSlot,

    /// The scorer was handed an empty candidate list. Callers must check for
    /// an empty discovery result before scoring.
    #[error("Slot selection invoked with no candidates")]
    NoCandidates,
}

impl SchedulerError {
    /// Whether the error stems from caller input rather than the engine.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SchedulerError::InvalidDatetime(_)
                | SchedulerError::InvalidTimezone(_)
                | SchedulerError::InvalidDuration(_)
                | SchedulerError::InvalidRequest(_)
                | SchedulerError::WindowTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

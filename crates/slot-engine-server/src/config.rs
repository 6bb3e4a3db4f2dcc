//! Server configuration.
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) yields a working server.
//!
//! ```toml
//! bind = "127.0.0.1:8080"
//! display_timezone = "Asia/Kolkata"
//!
//! [policy]
//! step_minutes = 30
//!
//! [policy.weights]
//! buffer_penalty = 12
//!
//! [[seed_events]]
//! id = "e1"
//! title = "Existing Meeting"
//! participantId = "u1"
//! start = "2025-08-02T14:00:00Z"
//! end = "2025-08-02T15:00:00Z"
//! ```

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::temporal::{parse_rfc3339, parse_timezone};
use slot_engine::{CalendarEvent, SchedulerError, SlotPolicy, DEFAULT_MEETING_TITLE};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] SchedulerError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// IANA zone used when rendering times in responses.
    pub display_timezone: String,
    /// Title given to booked meetings when the request has none.
    pub default_title: String,
    pub policy: SlotPolicy,
    /// Calendar contents present at startup.
    pub seed_events: Vec<CalendarEvent>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            display_timezone: "UTC".to_string(),
            default_title: DEFAULT_MEETING_TITLE.to_string(),
            policy: SlotPolicy::default(),
            seed_events: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timezone()?;
        self.policy.validate()?;
        if let Some(bad) = self.seed_events.iter().find(|e| e.end < e.start) {
            return Err(SchedulerError::InvalidRequest(format!(
                "seed event '{}' ends before it starts",
                bad.id
            ))
            .into());
        }
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        Ok(parse_timezone(&self.display_timezone)?)
    }

    /// A small fixed calendar for trying the service out.
    pub fn demo_events() -> Result<Vec<CalendarEvent>, SchedulerError> {
        [
            ("e1", "u1", "2025-08-02T14:00:00Z", "2025-08-02T15:00:00Z"),
            ("e2", "u2", "2025-08-03T09:00:00Z", "2025-08-03T10:00:00Z"),
            ("e3", "u3", "2025-08-04T13:00:00Z", "2025-08-04T14:00:00Z"),
        ]
        .into_iter()
        .map(|(id, who, start, end)| {
            Ok(CalendarEvent {
                id: id.to_string(),
                title: "Existing Meeting".to_string(),
                participant_id: who.to_string(),
                start: parse_rfc3339(start)?,
                end: parse_rfc3339(end)?,
            })
        })
        .collect()
    }
}

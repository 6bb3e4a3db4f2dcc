//! Application state for the HTTP server.

use std::sync::Arc;

use chrono_tz::Tz;
use slot_engine::{CalendarStore, InMemoryCalendar, SlotPolicy};

use crate::config::{ConfigError, ServerConfig};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Calendar the scheduler reads from and books into.
    pub store: Arc<dyn CalendarStore>,
    pub policy: Arc<SlotPolicy>,
    /// Zone every outgoing timestamp is rendered in.
    pub display_tz: Tz,
    pub default_title: String,
}

impl AppState {
    pub fn new(store: Arc<dyn CalendarStore>, policy: SlotPolicy, display_tz: Tz) -> Self {
        Self {
            store,
            policy: Arc::new(policy),
            display_tz,
            default_title: slot_engine::DEFAULT_MEETING_TITLE.to_string(),
        }
    }

    /// Build state backed by an in-memory calendar seeded from `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = Arc::new(InMemoryCalendar::with_events(config.seed_events.clone()));
        Ok(Self {
            store,
            policy: Arc::new(config.policy.clone()),
            display_tz: config.timezone()?,
            default_title: config.default_title.clone(),
        })
    }
}

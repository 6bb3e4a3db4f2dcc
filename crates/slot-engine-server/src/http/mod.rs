//! HTTP boundary for the scheduler.
//!
//! Handlers parse and validate requests, hand typed values to `slot-engine`,
//! and render results in the configured display timezone. No scheduling logic
//! lives here.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

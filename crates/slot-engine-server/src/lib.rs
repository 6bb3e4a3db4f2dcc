//! # slot-engine-server
//!
//! HTTP front end for `slot-engine`: books meetings with `POST /schedule` and
//! lists a user's events with `GET /users/{userId}/calendar`.

pub mod config;
pub mod http;

pub use config::{ConfigError, ServerConfig};
pub use http::{create_router, AppState};

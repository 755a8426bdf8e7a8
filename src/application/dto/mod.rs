//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP routes can
//! serialize/deserialize without shaping the domain model around JSON.

pub mod event_log;

pub use event_log::*;

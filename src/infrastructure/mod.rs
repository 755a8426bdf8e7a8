//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapter for events, games and scenario data
//! - HTTP: read-only REST views of the event log
//! - Config: Application configuration
//! - State: Shared application state
//! - Workers: Background retention sweeps

pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
pub mod workers;

//! Application services - Use case implementations
//!
//! This module contains the application services of the event log. Each
//! service accepts port dependencies and returns domain entities or DTOs.

pub mod event_log_service;
pub mod event_logger_service;
pub mod retention_service;

pub use event_log_service::{EventLogService, EventLogServiceImpl, DEFAULT_LOG_LIMIT};
pub use event_logger_service::{EventLogger, LogError};
pub use retention_service::{RetentionSweeper, SweepReport, DEFAULT_MAX_AGE};

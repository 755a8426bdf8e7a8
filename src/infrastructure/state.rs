//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::SystemClock;
use crate::application::services::{EventLogServiceImpl, EventLogger, RetentionSweeper};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SqliteRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub repository: SqliteRepository,
    // Application services
    pub event_logger: EventLogger,
    pub event_log_service: EventLogServiceImpl,
    pub retention_sweeper: RetentionSweeper,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = SqliteRepository::connect(&config.database_url).await?;
        Ok(Self::with_repository(config, repository))
    }

    /// Wire the services on top of an already opened repository
    pub fn with_repository(config: AppConfig, repository: SqliteRepository) -> Self {
        let events = Arc::new(repository.events());
        let scenarios = Arc::new(repository.scenarios());

        let event_logger = EventLogger::new(events.clone());
        let event_log_service = EventLogServiceImpl::new(events.clone(), scenarios);
        let retention_sweeper = RetentionSweeper::new(events, Arc::new(SystemClock));

        Self {
            config,
            repository,
            event_logger,
            event_log_service,
            retention_sweeper,
        }
    }
}

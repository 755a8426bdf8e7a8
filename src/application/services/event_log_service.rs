//! Event log service - Read side of the event log
//!
//! Lists stored events for the admin views and renders a game's log for
//! players.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::dto::EventRowDto;
use crate::application::ports::outbound::{EventFilter, EventStorePort, ScenarioRepositoryPort};
use crate::domain::services::{EventRenderer, RenderedEvent};
use crate::domain::value_objects::GameId;

/// Default number of log lines shown to players
pub const DEFAULT_LOG_LIMIT: u32 = 50;

/// Read-side use cases of the event log
#[async_trait]
pub trait EventLogService: Send + Sync {
    /// List stored events matching a filter, newest first, with their sentence
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventRowDto>>;

    /// Render the latest events of a game as log lines
    async fn rendered_log(&self, game_id: GameId, limit: u32) -> Result<Vec<RenderedEvent>>;
}

/// Default implementation of EventLogService using port abstractions
#[derive(Clone)]
pub struct EventLogServiceImpl {
    events: Arc<dyn EventStorePort>,
    scenarios: Arc<dyn ScenarioRepositoryPort>,
}

impl EventLogServiceImpl {
    pub fn new(events: Arc<dyn EventStorePort>, scenarios: Arc<dyn ScenarioRepositoryPort>) -> Self {
        Self { events, scenarios }
    }
}

#[async_trait]
impl EventLogService for EventLogServiceImpl {
    #[instrument(skip(self))]
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventRowDto>> {
        debug!(game_id = %filter.game_id, "Listing events");
        let events = self
            .events
            .list(filter)
            .await
            .context("Failed to list events from store")?;
        let scenario = self
            .scenarios
            .load_catalog()
            .await
            .context("Failed to load scenario catalog")?;

        let renderer = EventRenderer::new(&scenario);
        Ok(events
            .into_iter()
            .map(|event| {
                let text = renderer.render(&event).text;
                EventRowDto::new(event, text)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn rendered_log(&self, game_id: GameId, limit: u32) -> Result<Vec<RenderedEvent>> {
        let filter = EventFilter::for_game(game_id).with_limit(limit);
        let events = self
            .events
            .list(&filter)
            .await
            .context("Failed to list events from store")?;
        let scenario = self
            .scenarios
            .load_catalog()
            .await
            .context("Failed to load scenario catalog")?;

        let renderer = EventRenderer::new(&scenario);
        debug!(game_id = %game_id, count = events.len(), "Rendering event log");
        Ok(events.iter().map(|event| renderer.render(event)).collect())
    }
}

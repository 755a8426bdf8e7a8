//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::entities::{
    Area, Country, Event, EventKind, EventPayload, Game, NewEvent, ScenarioCatalog,
};
use crate::domain::value_objects::{CountryId, EventId, GameId, Phase, Season};

// =============================================================================
// Event Store Port
// =============================================================================

/// Selection of a game's events, as used by the admin list views
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub game_id: GameId,
    pub kind: Option<EventKind>,
    pub year: Option<u32>,
    pub season: Option<Season>,
    pub phase: Option<Phase>,
    pub country: Option<CountryId>,
    pub message: Option<u8>,
    pub limit: Option<u32>,
}

impl EventFilter {
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            game_id,
            kind: None,
            year: None,
            season: None,
            phase: None,
            country: None,
            message: None,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether the payload passes the filters that live in the kind records
    pub fn matches_payload(&self, payload: &EventPayload) -> bool {
        if let Some(country) = self.country {
            if payload.country() != Some(country) {
                return false;
            }
        }
        if let Some(message) = self.message {
            if payload.message_code() != Some(message) {
                return false;
            }
        }
        true
    }

    /// Whether all filters can be evaluated on the base table
    pub fn is_base_only(&self) -> bool {
        self.country.is_none() && self.message.is_none()
    }
}

/// Append-only store of game events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStorePort: Send + Sync {
    /// Store a new event and return its id
    async fn insert(&self, event: &NewEvent) -> Result<EventId, StoreError>;

    /// Get an event by id
    async fn get(&self, id: EventId) -> Result<Option<Event>, StoreError>;

    /// List events newest first: year, then season, then insertion order
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;

    /// Delete the events of finished games whose last phase change is before `cutoff`
    async fn delete_for_finished_games(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError>;
}

// =============================================================================
// Game Repository Port
// =============================================================================

/// Games as mirrored from the game engine
#[async_trait]
pub trait GameRepositoryPort: Send + Sync {
    /// Create or replace a game
    async fn save(&self, game: &Game) -> Result<(), StoreError>;

    async fn get(&self, id: GameId) -> Result<Option<Game>, StoreError>;

    /// Delete a game together with its events
    async fn delete(&self, id: GameId) -> Result<bool, StoreError>;
}

// =============================================================================
// Scenario Repository Port
// =============================================================================

/// Scenario reference data used to name areas and countries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScenarioRepositoryPort: Send + Sync {
    async fn save_area(&self, area: &Area) -> Result<(), StoreError>;

    async fn save_country(&self, country: &Country) -> Result<(), StoreError>;

    /// Load every known area and country
    async fn load_catalog(&self) -> Result<ScenarioCatalog, StoreError>;
}

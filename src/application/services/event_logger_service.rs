//! Event logger - Records game facts in the event store
//!
//! Logging is a side effect of the engine's state transitions, so it never
//! reports failure to its caller. Errors are traced and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::application::ports::inbound::GameFactListener;
use crate::application::ports::outbound::{EventStorePort, StoreError};
use crate::domain::entities::{Game, NewEvent};
use crate::domain::events::{FactError, GameFact};
use crate::domain::value_objects::{EventId, GameId};

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Incomplete fact: {0}")]
    Incomplete(#[from] FactError),

    #[error("Game {0} has no valid year")]
    InvalidYear(GameId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Writes one event per reported fact
#[derive(Clone)]
pub struct EventLogger {
    store: Arc<dyn EventStorePort>,
}

impl EventLogger {
    pub fn new(store: Arc<dyn EventStorePort>) -> Self {
        Self { store }
    }

    /// Record a fact for a game. Returns the new event id, or `None` if
    /// nothing was stored.
    #[instrument(skip(self, game, fact), fields(game_id = %game.id, fact = fact.name()))]
    pub async fn record(&self, game: &Game, fact: GameFact) -> Option<EventId> {
        let name = fact.name();
        match self.try_record(game, fact).await {
            Ok(id) => {
                debug!(event_id = %id, "Logged {}", name);
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Dropped {} event", name);
                None
            }
        }
    }

    async fn try_record(&self, game: &Game, fact: GameFact) -> Result<EventId, LogError> {
        if game.year == 0 {
            return Err(LogError::InvalidYear(game.id));
        }
        let payload = fact.into_payload()?;
        let event = NewEvent::for_game(game, payload);
        Ok(self.store.insert(&event).await?)
    }
}

#[async_trait]
impl GameFactListener for EventLogger {
    async fn on_fact(&self, game: &Game, fact: GameFact) {
        self.record(game, fact).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockEventStorePort;
    use crate::domain::entities::{EventKind, EventPayload};
    use crate::domain::events::{OrderFact, UnitFact};
    use crate::domain::value_objects::{AreaId, CountryId, OrderCode, Phase, Season, UnitType};

    fn game() -> Game {
        Game::new(1454, Season::Summer, Phase::Orders)
    }

    fn placed_fleet() -> GameFact {
        GameFact::UnitPlaced(UnitFact {
            country: Some(CountryId::new()),
            unit_type: UnitType::Fleet,
            area: AreaId::new(),
        })
    }

    #[tokio::test]
    async fn test_record_stamps_game_calendar() {
        let game = game();
        let game_id = game.id;
        let mut store = MockEventStorePort::new();
        store
            .expect_insert()
            .withf(move |event| {
                event.game_id == game_id
                    && event.year == 1454
                    && event.season == Season::Summer
                    && event.phase == Phase::Orders
                    && event.payload.kind() == EventKind::NewUnit
            })
            .times(1)
            .returning(|_| Ok(EventId::new(7)));

        let logger = EventLogger::new(Arc::new(store));
        assert_eq!(logger.record(&game, placed_fleet()).await, Some(EventId::new(7)));
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let mut store = MockEventStorePort::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::database("insert_event", "constraint failed")));

        let logger = EventLogger::new(Arc::new(store));
        assert_eq!(logger.record(&game(), placed_fleet()).await, None);
    }

    #[tokio::test]
    async fn test_incomplete_fact_never_reaches_store() {
        let mut store = MockEventStorePort::new();
        store.expect_insert().never();

        let logger = EventLogger::new(Arc::new(store));
        let fact = GameFact::OrderPlaced(OrderFact {
            country: CountryId::new(),
            unit_type: UnitType::Army,
            origin: AreaId::new(),
            code: OrderCode::Advance,
            destination: None,
            conversion: None,
            subunit: None,
            subcode: None,
            subdestination: None,
            subconversion: None,
        });
        assert_eq!(logger.record(&game(), fact).await, None);
    }

    #[tokio::test]
    async fn test_listener_uses_logger() {
        let mut store = MockEventStorePort::new();
        store
            .expect_insert()
            .withf(|event| matches!(event.payload, EventPayload::Income(ref e) if e.ducats == 14))
            .times(1)
            .returning(|_| Ok(EventId::new(1)));

        let listener: Arc<dyn GameFactListener> = Arc::new(EventLogger::new(Arc::new(store)));
        listener
            .on_fact(
                &game(),
                GameFact::IncomeRaised {
                    country: CountryId::new(),
                    ducats: 14,
                },
            )
            .await;
    }

    #[tokio::test]
    async fn test_year_zero_is_rejected() {
        let mut store = MockEventStorePort::new();
        store.expect_insert().never();

        let mut game = game();
        game.year = 0;
        let logger = EventLogger::new(Arc::new(store));
        assert_eq!(logger.record(&game, placed_fleet()).await, None);
    }
}

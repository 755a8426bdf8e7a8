//! Inbound ports - Interfaces that the application exposes to the game engine

use async_trait::async_trait;

use crate::domain::entities::Game;
use crate::domain::events::GameFact;

/// Receives facts from the game engine as they happen.
///
/// Implementations must never fail the caller: the engine's state transition
/// has already happened and does not depend on the log.
#[async_trait]
pub trait GameFactListener: Send + Sync {
    async fn on_fact(&self, game: &Game, fact: GameFact);
}

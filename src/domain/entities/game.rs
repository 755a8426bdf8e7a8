//! Game entity - the host engine's view of a game session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GameId, Phase, Season};

/// Current calendar position and status of a game.
///
/// The host engine owns games; this service only reads them to stamp events
/// and to decide which logs may be swept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub year: u32,
    pub season: Season,
    pub phase: Phase,
    /// Player slots still open
    pub slots: u32,
    pub last_phase_change: DateTime<Utc>,
}

impl Game {
    pub fn new(year: u32, season: Season, phase: Phase) -> Self {
        Self {
            id: GameId::new(),
            year,
            season,
            phase,
            slots: 0,
            last_phase_change: Utc::now(),
        }
    }

    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_last_phase_change(mut self, at: DateTime<Utc>) -> Self {
        self.last_phase_change = at;
        self
    }
}

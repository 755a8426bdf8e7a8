//! Game calendar: seasons and turn phases

use serde::{Deserialize, Serialize};

/// Season of a game year. Stored as its number (1..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Spring, Season::Summer, Season::Fall];

    pub fn number(&self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
        }
    }

    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            _ => None,
        }
    }
}

/// Sub-step of a game turn. Stored as its number (0..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The game has not started or has finished
    Inactive,
    /// Units are placed or disbanded
    Adjustments,
    Orders,
    Retreats,
    /// Strategic movement
    Movement,
}

impl Phase {
    pub fn number(&self) -> u8 {
        match self {
            Phase::Inactive => 0,
            Phase::Adjustments => 1,
            Phase::Orders => 2,
            Phase::Retreats => 3,
            Phase::Movement => 4,
        }
    }

    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            0 => Some(Phase::Inactive),
            1 => Some(Phase::Adjustments),
            2 => Some(Phase::Orders),
            3 => Some(Phase::Retreats),
            4 => Some(Phase::Movement),
            _ => None,
        }
    }
}

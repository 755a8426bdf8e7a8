//! Domain events - Facts reported by the game engine

mod game_facts;

pub use game_facts::{ExpenseFact, FactError, GameFact, OrderFact, UnitFact, UnitRef};

//! Domain entities

mod event;
mod game;
mod scenario;

pub use event::{
    ControlEvent, ConversionEvent, CountryConditionEvent, DisasterEvent, DisbandEvent, Event,
    EventKind, EventPayload, ExpenseEvent, IncomeEvent, NewEvent, NewUnitEvent, OrderEvent,
    StandoffEvent, UncoverEvent, UnitConditionEvent, UnitMoveEvent,
};
pub use game::Game;
pub use scenario::{Area, Country, ScenarioCatalog};

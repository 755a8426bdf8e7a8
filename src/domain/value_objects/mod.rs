//! Value objects - Immutable objects defined by their attributes

mod conditions;
mod game_time;
mod ids;
mod units;

pub use conditions::{CountryCondition, DisasterKind, ExpenseKind, UnitCondition};
pub use game_time::{Phase, Season};
pub use ids::*;
pub use units::{OrderCode, UnitType};

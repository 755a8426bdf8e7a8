//! Game event entity - Immutable log records of things that happened in a game
//!
//! Every event carries the game's calendar position at the time it was
//! recorded plus one payload variant per event kind. Events are written once
//! and never updated.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Game;
use crate::domain::value_objects::{
    AreaId, CountryCondition, CountryId, DisasterKind, EventId, ExpenseKind, GameId, OrderCode,
    Phase, Season, UnitCondition, UnitType,
};

/// A stored event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub game_id: GameId,
    pub year: u32,
    pub season: Season,
    pub phase: Phase,
    pub payload: EventPayload,
}

/// An event that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub game_id: GameId,
    pub year: u32,
    pub season: Season,
    pub phase: Phase,
    pub payload: EventPayload,
}

impl NewEvent {
    /// Stamp a payload with the game's current year, season and phase
    pub fn for_game(game: &Game, payload: EventPayload) -> Self {
        Self {
            game_id: game.id,
            year: game.year,
            season: game.season,
            phase: game.phase,
            payload,
        }
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            game_id: self.game_id,
            year: self.year,
            season: self.season,
            phase: self.phase,
            payload: self.payload,
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

/// Kind-specific part of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    NewUnit(NewUnitEvent),
    Disband(DisbandEvent),
    Order(OrderEvent),
    Standoff(StandoffEvent),
    Conversion(ConversionEvent),
    Control(ControlEvent),
    Movement(UnitMoveEvent),
    Retreat(UnitMoveEvent),
    UnitCondition(UnitConditionEvent),
    CountryCondition(CountryConditionEvent),
    Disaster(DisasterEvent),
    Income(IncomeEvent),
    Expense(ExpenseEvent),
    Uncover(UncoverEvent),
}

/// A new unit is placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUnitEvent {
    pub country: CountryId,
    pub unit_type: UnitType,
    pub area: AreaId,
}

/// A unit is disbanded. Autonomous units have no country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbandEvent {
    pub country: Option<CountryId>,
    pub unit_type: UnitType,
    pub area: AreaId,
}

/// A confirmed order.
///
/// The `sub*` fields describe the unit being supported or convoyed and what
/// it was ordered to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub country: CountryId,
    pub unit_type: UnitType,
    pub origin: AreaId,
    pub code: OrderCode,
    pub destination: Option<AreaId>,
    pub conversion: Option<UnitType>,
    pub subtype: Option<UnitType>,
    pub suborigin: Option<AreaId>,
    pub subcode: Option<OrderCode>,
    pub subdestination: Option<AreaId>,
    pub subconversion: Option<UnitType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandoffEvent {
    pub area: AreaId,
}

/// A unit changes its type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionEvent {
    pub country: Option<CountryId>,
    pub area: AreaId,
    pub before: UnitType,
    pub after: UnitType,
}

/// A country takes control of an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlEvent {
    pub country: CountryId,
    pub area: AreaId,
    pub new_home: bool,
}

/// A unit advances or retreats from one area to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMoveEvent {
    pub country: Option<CountryId>,
    pub unit_type: UnitType,
    pub origin: AreaId,
    pub destination: AreaId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConditionEvent {
    pub country: Option<CountryId>,
    pub unit_type: UnitType,
    pub area: AreaId,
    pub condition: UnitCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConditionEvent {
    pub country: CountryId,
    pub condition: CountryCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterEvent {
    pub area: AreaId,
    pub disaster: DisasterKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEvent {
    pub country: CountryId,
    pub ducats: u32,
}

/// Ducats spent by a country. Area and unit type depend on the expense kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEvent {
    pub country: CountryId,
    pub ducats: u32,
    pub expense: ExpenseKind,
    pub area: Option<AreaId>,
    pub unit_type: Option<UnitType>,
}

/// A diplomat is exposed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncoverEvent {
    pub country: Option<CountryId>,
    pub area: AreaId,
}

/// Discriminator of [`EventPayload`], stored in the `kind` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewUnit,
    Disband,
    Order,
    Standoff,
    Conversion,
    Control,
    Movement,
    Retreat,
    UnitCondition,
    CountryCondition,
    Disaster,
    Income,
    Expense,
    Uncover,
}

impl EventKind {
    pub const ALL: [EventKind; 14] = [
        EventKind::NewUnit,
        EventKind::Disband,
        EventKind::Order,
        EventKind::Standoff,
        EventKind::Conversion,
        EventKind::Control,
        EventKind::Movement,
        EventKind::Retreat,
        EventKind::UnitCondition,
        EventKind::CountryCondition,
        EventKind::Disaster,
        EventKind::Income,
        EventKind::Expense,
        EventKind::Uncover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NewUnit => "new_unit",
            EventKind::Disband => "disband",
            EventKind::Order => "order",
            EventKind::Standoff => "standoff",
            EventKind::Conversion => "conversion",
            EventKind::Control => "control",
            EventKind::Movement => "movement",
            EventKind::Retreat => "retreat",
            EventKind::UnitCondition => "unit_condition",
            EventKind::CountryCondition => "country_condition",
            EventKind::Disaster => "disaster",
            EventKind::Income => "income",
            EventKind::Expense => "expense",
            EventKind::Uncover => "uncover",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::NewUnit(_) => EventKind::NewUnit,
            EventPayload::Disband(_) => EventKind::Disband,
            EventPayload::Order(_) => EventKind::Order,
            EventPayload::Standoff(_) => EventKind::Standoff,
            EventPayload::Conversion(_) => EventKind::Conversion,
            EventPayload::Control(_) => EventKind::Control,
            EventPayload::Movement(_) => EventKind::Movement,
            EventPayload::Retreat(_) => EventKind::Retreat,
            EventPayload::UnitCondition(_) => EventKind::UnitCondition,
            EventPayload::CountryCondition(_) => EventKind::CountryCondition,
            EventPayload::Disaster(_) => EventKind::Disaster,
            EventPayload::Income(_) => EventKind::Income,
            EventPayload::Expense(_) => EventKind::Expense,
            EventPayload::Uncover(_) => EventKind::Uncover,
        }
    }

    /// Country the event is about, if the kind has one and it is set
    pub fn country(&self) -> Option<CountryId> {
        match self {
            EventPayload::NewUnit(e) => Some(e.country),
            EventPayload::Disband(e) => e.country,
            EventPayload::Order(e) => Some(e.country),
            EventPayload::Standoff(_) => None,
            EventPayload::Conversion(e) => e.country,
            EventPayload::Control(e) => Some(e.country),
            EventPayload::Movement(e) | EventPayload::Retreat(e) => e.country,
            EventPayload::UnitCondition(e) => e.country,
            EventPayload::CountryCondition(e) => Some(e.country),
            EventPayload::Disaster(_) => None,
            EventPayload::Income(e) => Some(e.country),
            EventPayload::Expense(e) => Some(e.country),
            EventPayload::Uncover(e) => e.country,
        }
    }

    /// Message code of the kinds that carry one
    pub fn message_code(&self) -> Option<u8> {
        match self {
            EventPayload::UnitCondition(e) => Some(e.condition.code()),
            EventPayload::CountryCondition(e) => Some(e.condition.code()),
            EventPayload::Disaster(e) => Some(e.disaster.code()),
            EventPayload::Expense(e) => Some(e.expense.code()),
            _ => None,
        }
    }
}

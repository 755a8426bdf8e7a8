//! Game facts - Notifications from the game engine about finished actions
//!
//! The engine reports one fact per notable action. Each fact maps to exactly
//! one event payload; facts that cannot produce a complete payload are
//! rejected with [`FactError`].

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    ControlEvent, ConversionEvent, CountryConditionEvent, DisasterEvent, DisbandEvent,
    EventPayload, ExpenseEvent, IncomeEvent, NewUnitEvent, OrderEvent, StandoffEvent,
    UncoverEvent, UnitConditionEvent, UnitMoveEvent,
};
use crate::domain::value_objects::{
    AreaId, CountryCondition, CountryId, DisasterKind, ExpenseKind, OrderCode, UnitCondition,
    UnitType,
};

/// A unit on the board. `country` is `None` for autonomous units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFact {
    pub country: Option<CountryId>,
    pub unit_type: UnitType,
    pub area: AreaId,
}

/// Type and position of a unit referenced by another order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub unit_type: UnitType,
    pub area: AreaId,
}

/// A confirmed order as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFact {
    pub country: CountryId,
    pub unit_type: UnitType,
    pub origin: AreaId,
    pub code: OrderCode,
    pub destination: Option<AreaId>,
    pub conversion: Option<UnitType>,
    pub subunit: Option<UnitRef>,
    pub subcode: Option<OrderCode>,
    pub subdestination: Option<AreaId>,
    pub subconversion: Option<UnitType>,
}

/// A payment made by a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFact {
    pub country: CountryId,
    pub ducats: u32,
    pub expense: ExpenseKind,
    /// Targeted unit, for bribes and counter-bribes
    pub unit: Option<UnitRef>,
    /// Targeted area, for expenses that do not target a unit
    pub area: Option<AreaId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fact", rename_all = "snake_case")]
pub enum GameFact {
    UnitPlaced(UnitFact),
    UnitDisbanded(UnitFact),
    OrderPlaced(OrderFact),
    StandoffHappened { area: AreaId },
    UnitConverted {
        country: Option<CountryId>,
        area: AreaId,
        before: UnitType,
        after: UnitType,
    },
    AreaControlled {
        country: CountryId,
        area: AreaId,
        new_home: bool,
    },
    UnitMoved { unit: UnitFact, destination: AreaId },
    UnitRetreated { unit: UnitFact, destination: AreaId },
    SupportBroken(UnitFact),
    ForcedToRetreat(UnitFact),
    UnitSurrendered(UnitFact),
    SiegeStarted(UnitFact),
    UnitChangedCountry(UnitFact),
    UnitToAutonomous(UnitFact),
    GovernmentOverthrown { country: CountryId },
    CountryConquered { country: CountryId },
    CountryExcommunicated { country: CountryId },
    CountryEliminated { country: CountryId },
    PlayerAssassinated { country: CountryId },
    CountryForgiven { country: CountryId },
    AssassinationAttempted { country: CountryId },
    FamineMarkerPlaced { area: AreaId },
    PlagueStruck { area: AreaId },
    RebellionStarted { area: AreaId },
    StormMarkerPlaced { area: AreaId },
    IncomeRaised { country: CountryId, ducats: u32 },
    ExpensePaid(ExpenseFact),
    DiplomatUncovered {
        country: Option<CountryId>,
        area: AreaId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactError {
    #[error("{fact} is missing {field}")]
    MissingField {
        fact: &'static str,
        field: &'static str,
    },
    #[error("{fact} requires a country")]
    MissingCountry { fact: &'static str },
}

impl GameFact {
    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            GameFact::UnitPlaced(_) => "unit_placed",
            GameFact::UnitDisbanded(_) => "unit_disbanded",
            GameFact::OrderPlaced(_) => "order_placed",
            GameFact::StandoffHappened { .. } => "standoff_happened",
            GameFact::UnitConverted { .. } => "unit_converted",
            GameFact::AreaControlled { .. } => "area_controlled",
            GameFact::UnitMoved { .. } => "unit_moved",
            GameFact::UnitRetreated { .. } => "unit_retreated",
            GameFact::SupportBroken(_) => "support_broken",
            GameFact::ForcedToRetreat(_) => "forced_to_retreat",
            GameFact::UnitSurrendered(_) => "unit_surrendered",
            GameFact::SiegeStarted(_) => "siege_started",
            GameFact::UnitChangedCountry(_) => "unit_changed_country",
            GameFact::UnitToAutonomous(_) => "unit_to_autonomous",
            GameFact::GovernmentOverthrown { .. } => "government_overthrown",
            GameFact::CountryConquered { .. } => "country_conquered",
            GameFact::CountryExcommunicated { .. } => "country_excommunicated",
            GameFact::CountryEliminated { .. } => "country_eliminated",
            GameFact::PlayerAssassinated { .. } => "player_assassinated",
            GameFact::CountryForgiven { .. } => "country_forgiven",
            GameFact::AssassinationAttempted { .. } => "assassination_attempted",
            GameFact::FamineMarkerPlaced { .. } => "famine_marker_placed",
            GameFact::PlagueStruck { .. } => "plague_struck",
            GameFact::RebellionStarted { .. } => "rebellion_started",
            GameFact::StormMarkerPlaced { .. } => "storm_marker_placed",
            GameFact::IncomeRaised { .. } => "income_raised",
            GameFact::ExpensePaid(_) => "expense_paid",
            GameFact::DiplomatUncovered { .. } => "diplomat_uncovered",
        }
    }

    /// Build the event payload this fact is logged as
    pub fn into_payload(self) -> Result<EventPayload, FactError> {
        let name = self.name();
        let payload = match self {
            GameFact::UnitPlaced(unit) => EventPayload::NewUnit(NewUnitEvent {
                country: unit.country.ok_or(FactError::MissingCountry { fact: name })?,
                unit_type: unit.unit_type,
                area: unit.area,
            }),
            GameFact::UnitDisbanded(unit) => EventPayload::Disband(DisbandEvent {
                country: unit.country,
                unit_type: unit.unit_type,
                area: unit.area,
            }),
            GameFact::OrderPlaced(order) => EventPayload::Order(order_payload(order)?),
            GameFact::StandoffHappened { area } => {
                EventPayload::Standoff(StandoffEvent { area })
            }
            GameFact::UnitConverted {
                country,
                area,
                before,
                after,
            } => EventPayload::Conversion(ConversionEvent {
                country,
                area,
                before,
                after,
            }),
            GameFact::AreaControlled {
                country,
                area,
                new_home,
            } => EventPayload::Control(ControlEvent {
                country,
                area,
                new_home,
            }),
            GameFact::UnitMoved { unit, destination } => {
                EventPayload::Movement(unit_move(unit, destination))
            }
            GameFact::UnitRetreated { unit, destination } => {
                EventPayload::Retreat(unit_move(unit, destination))
            }
            GameFact::SupportBroken(unit) => unit_condition(unit, UnitCondition::SupportBroken),
            GameFact::ForcedToRetreat(unit) => unit_condition(unit, UnitCondition::MustRetreat),
            GameFact::UnitSurrendered(unit) => unit_condition(unit, UnitCondition::Surrenders),
            GameFact::SiegeStarted(unit) => unit_condition(unit, UnitCondition::Besieging),
            GameFact::UnitChangedCountry(unit) => {
                unit_condition(unit, UnitCondition::ChangedCountry)
            }
            GameFact::UnitToAutonomous(unit) => {
                unit_condition(unit, UnitCondition::BecameAutonomous)
            }
            GameFact::GovernmentOverthrown { country } => {
                country_condition(country, CountryCondition::GovernmentOverthrown)
            }
            GameFact::CountryConquered { country } => {
                country_condition(country, CountryCondition::Conquered)
            }
            GameFact::CountryExcommunicated { country } => {
                country_condition(country, CountryCondition::Excommunicated)
            }
            GameFact::CountryEliminated { country } => {
                country_condition(country, CountryCondition::Eliminated)
            }
            GameFact::PlayerAssassinated { country } => {
                country_condition(country, CountryCondition::LeaderAssassinated)
            }
            GameFact::CountryForgiven { country } => {
                country_condition(country, CountryCondition::ExcommunicationLifted)
            }
            GameFact::AssassinationAttempted { country } => {
                country_condition(country, CountryCondition::AssassinationAttempted)
            }
            GameFact::FamineMarkerPlaced { area } => disaster(area, DisasterKind::Famine),
            GameFact::PlagueStruck { area } => disaster(area, DisasterKind::Plague),
            GameFact::RebellionStarted { area } => disaster(area, DisasterKind::Rebellion),
            GameFact::StormMarkerPlaced { area } => disaster(area, DisasterKind::Storm),
            GameFact::IncomeRaised { country, ducats } => {
                EventPayload::Income(IncomeEvent { country, ducats })
            }
            GameFact::ExpensePaid(expense) => EventPayload::Expense(expense_payload(expense)?),
            GameFact::DiplomatUncovered { country, area } => {
                EventPayload::Uncover(UncoverEvent { country, area })
            }
        };
        Ok(payload)
    }
}

fn unit_move(unit: UnitFact, destination: AreaId) -> UnitMoveEvent {
    UnitMoveEvent {
        country: unit.country,
        unit_type: unit.unit_type,
        origin: unit.area,
        destination,
    }
}

fn unit_condition(unit: UnitFact, condition: UnitCondition) -> EventPayload {
    EventPayload::UnitCondition(UnitConditionEvent {
        country: unit.country,
        unit_type: unit.unit_type,
        area: unit.area,
        condition,
    })
}

fn country_condition(country: CountryId, condition: CountryCondition) -> EventPayload {
    EventPayload::CountryCondition(CountryConditionEvent { country, condition })
}

fn disaster(area: AreaId, disaster: DisasterKind) -> EventPayload {
    EventPayload::Disaster(DisasterEvent { area, disaster })
}

fn order_payload(order: OrderFact) -> Result<OrderEvent, FactError> {
    let missing = |field| FactError::MissingField {
        fact: "order_placed",
        field,
    };

    match order.code {
        OrderCode::Advance if order.destination.is_none() => return Err(missing("destination")),
        OrderCode::Conversion if order.conversion.is_none() => return Err(missing("conversion")),
        OrderCode::Convoy | OrderCode::Support if order.subunit.is_none() => {
            return Err(missing("subunit"))
        }
        OrderCode::Convoy if order.subdestination.is_none() => {
            return Err(missing("subdestination"))
        }
        OrderCode::Support => match order.subcode {
            Some(OrderCode::Advance) if order.subdestination.is_none() => {
                return Err(missing("subdestination"))
            }
            Some(OrderCode::Conversion) if order.subconversion.is_none() => {
                return Err(missing("subconversion"))
            }
            _ => {}
        },
        _ => {}
    }

    Ok(OrderEvent {
        country: order.country,
        unit_type: order.unit_type,
        origin: order.origin,
        code: order.code,
        destination: order.destination,
        conversion: order.conversion,
        subtype: order.subunit.map(|unit| unit.unit_type),
        suborigin: order.subunit.map(|unit| unit.area),
        subcode: order.subcode,
        subdestination: order.subdestination,
        subconversion: order.subconversion,
    })
}

fn expense_payload(expense: ExpenseFact) -> Result<ExpenseEvent, FactError> {
    // Unit expenses log the unit's position, the others the targeted area
    let (area, unit_type) = match expense.unit {
        Some(unit) => (Some(unit.area), Some(unit.unit_type)),
        None => (expense.area, None),
    };

    if expense.expense.targets_unit() && unit_type.is_none() {
        return Err(FactError::MissingField {
            fact: "expense_paid",
            field: "unit",
        });
    }
    if area.is_none() {
        return Err(FactError::MissingField {
            fact: "expense_paid",
            field: "area",
        });
    }

    Ok(ExpenseEvent {
        country: expense.country,
        ducats: expense.ducats,
        expense: expense.expense,
        area,
        unit_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EventKind;

    fn order(code: OrderCode) -> OrderFact {
        OrderFact {
            country: CountryId::new(),
            unit_type: UnitType::Army,
            origin: AreaId::new(),
            code,
            destination: None,
            conversion: None,
            subunit: None,
            subcode: None,
            subdestination: None,
            subconversion: None,
        }
    }

    #[test]
    fn test_unit_condition_facts_map_to_codes() {
        let unit = UnitFact {
            country: None,
            unit_type: UnitType::Garrison,
            area: AreaId::new(),
        };
        let facts = [
            GameFact::SupportBroken(unit),
            GameFact::ForcedToRetreat(unit),
            GameFact::UnitSurrendered(unit),
            GameFact::SiegeStarted(unit),
            GameFact::UnitChangedCountry(unit),
            GameFact::UnitToAutonomous(unit),
        ];

        for (expected, fact) in facts.into_iter().enumerate() {
            let payload = fact.into_payload().unwrap();
            assert_eq!(payload.kind(), EventKind::UnitCondition);
            assert_eq!(payload.message_code(), Some(expected as u8));
        }
    }

    #[test]
    fn test_country_and_disaster_codes() {
        let country = CountryId::new();
        let payload = GameFact::AssassinationAttempted { country }
            .into_payload()
            .unwrap();
        assert_eq!(payload.message_code(), Some(6));

        let payload = GameFact::StormMarkerPlaced { area: AreaId::new() }
            .into_payload()
            .unwrap();
        assert_eq!(payload.kind(), EventKind::Disaster);
        assert_eq!(payload.message_code(), Some(3));
    }

    #[test]
    fn test_placed_unit_needs_country() {
        let fact = GameFact::UnitPlaced(UnitFact {
            country: None,
            unit_type: UnitType::Fleet,
            area: AreaId::new(),
        });
        assert_eq!(
            fact.into_payload(),
            Err(FactError::MissingCountry {
                fact: "unit_placed"
            })
        );
    }

    #[test]
    fn test_incomplete_orders_are_rejected() {
        assert!(GameFact::OrderPlaced(order(OrderCode::Advance))
            .into_payload()
            .is_err());
        assert!(GameFact::OrderPlaced(order(OrderCode::Conversion))
            .into_payload()
            .is_err());
        assert!(GameFact::OrderPlaced(order(OrderCode::Support))
            .into_payload()
            .is_err());

        let mut convoy = order(OrderCode::Convoy);
        convoy.subunit = Some(UnitRef {
            unit_type: UnitType::Army,
            area: AreaId::new(),
        });
        assert!(GameFact::OrderPlaced(convoy.clone()).into_payload().is_err());
        convoy.subdestination = Some(AreaId::new());
        assert!(GameFact::OrderPlaced(convoy).into_payload().is_ok());

        assert!(GameFact::OrderPlaced(order(OrderCode::Hold))
            .into_payload()
            .is_ok());
        assert!(GameFact::OrderPlaced(order(OrderCode::Besiege))
            .into_payload()
            .is_ok());
    }

    #[test]
    fn test_support_order_copies_subunit() {
        let supported = UnitRef {
            unit_type: UnitType::Fleet,
            area: AreaId::new(),
        };
        let mut support = order(OrderCode::Support);
        support.subunit = Some(supported);
        support.subcode = Some(OrderCode::Hold);

        let EventPayload::Order(event) = GameFact::OrderPlaced(support).into_payload().unwrap()
        else {
            panic!("expected an order payload");
        };
        assert_eq!(event.subtype, Some(UnitType::Fleet));
        assert_eq!(event.suborigin, Some(supported.area));
        assert_eq!(event.subcode, Some(OrderCode::Hold));
    }

    #[test]
    fn test_expense_takes_position_from_unit() {
        let unit_area = AreaId::new();
        let fact = GameFact::ExpensePaid(ExpenseFact {
            country: CountryId::new(),
            ducats: 9,
            expense: ExpenseKind::BuyEnemyUnit,
            unit: Some(UnitRef {
                unit_type: UnitType::Army,
                area: unit_area,
            }),
            area: Some(AreaId::new()),
        });

        let EventPayload::Expense(event) = fact.into_payload().unwrap() else {
            panic!("expected an expense payload");
        };
        assert_eq!(event.area, Some(unit_area));
        assert_eq!(event.unit_type, Some(UnitType::Army));
    }

    #[test]
    fn test_unit_expense_without_unit_is_rejected() {
        let fact = GameFact::ExpensePaid(ExpenseFact {
            country: CountryId::new(),
            ducats: 6,
            expense: ExpenseKind::CounterBribe,
            unit: None,
            area: Some(AreaId::new()),
        });
        assert!(fact.into_payload().is_err());
    }
}

//! Event renderer - Turns stored events into log lines for players
//!
//! Rendering is total: a missing optional relation, or an area or country the
//! scenario does not know about, becomes a placeholder instead of an error.

use serde::Serialize;

use crate::domain::entities::{
    ControlEvent, Event, EventPayload, ExpenseEvent, OrderEvent, ScenarioCatalog, UnitMoveEvent,
};
use crate::domain::value_objects::{
    AreaId, CountryId, DisasterKind, ExpenseKind, OrderCode, UnitCondition, UnitType,
};

const UNKNOWN_AREA: &str = "an unknown area";
const UNKNOWN_COUNTRY: &str = "an unknown country";
const UNKNOWN_UNIT: &str = "an unknown unit";
const UNKNOWN_TYPE: &str = "unknown unit";

/// A fully rendered log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEvent {
    pub text: String,
    pub html: String,
    pub season_class: String,
    pub event_class: &'static str,
    pub country_class: String,
}

/// Describe a unit by type and position, e.g. "the garrison in Naples"
pub fn unit_string(unit_type: UnitType, area_name: &str) -> String {
    match unit_type {
        UnitType::Army => format!("the army in {}", area_name),
        UnitType::Fleet => format!("the fleet in {}", area_name),
        UnitType::Garrison => format!("the garrison in {}", area_name),
    }
}

/// css class for the season the event happened in
pub fn season_class(event: &Event) -> String {
    format!("season_{}", event.season.number())
}

/// css class for the kind of event
pub fn event_class(event: &Event) -> &'static str {
    match &event.payload {
        EventPayload::NewUnit(_) => "new-unit-event",
        EventPayload::Disband(_) => "disband-event",
        EventPayload::Order(_) => "order-event",
        EventPayload::Standoff(_) => "standoff-event",
        EventPayload::Conversion(_) => "conversion-event",
        EventPayload::Control(_) => "control-event",
        EventPayload::Movement(_) | EventPayload::Retreat(_) => "movement-event",
        EventPayload::UnitCondition(e) => match e.condition {
            UnitCondition::SupportBroken => "broken-support-event",
            UnitCondition::MustRetreat => "retreat-event",
            UnitCondition::Surrenders => "surrender-event",
            UnitCondition::Besieging => "besieging-event",
            UnitCondition::ChangedCountry | UnitCondition::BecameAutonomous => "bribe-event",
        },
        EventPayload::CountryCondition(_) => "country-event",
        EventPayload::Disaster(e) => match e.disaster {
            DisasterKind::Famine => "famine-event",
            DisasterKind::Plague => "plague-event",
            DisasterKind::Rebellion => "rebellion-event",
            DisasterKind::Storm => "storm-event",
        },
        EventPayload::Income(_) => "income-event",
        EventPayload::Expense(_) => "expense-event",
        EventPayload::Uncover(_) => "uncover-event",
    }
}

/// Renders events against the areas and countries of a scenario
pub struct EventRenderer<'a> {
    scenario: &'a ScenarioCatalog,
}

impl<'a> EventRenderer<'a> {
    pub fn new(scenario: &'a ScenarioCatalog) -> Self {
        Self { scenario }
    }

    pub fn render(&self, event: &Event) -> RenderedEvent {
        RenderedEvent {
            text: capfirst(&self.message(event)),
            html: self.color_output(event),
            season_class: season_class(event),
            event_class: event_class(event),
            country_class: self.country_class(event),
        }
    }

    /// Static name of the event's country, or an empty string
    pub fn country_class(&self, event: &Event) -> String {
        event
            .payload
            .country()
            .and_then(|id| self.scenario.country(id))
            .map(|country| country.static_name.clone())
            .unwrap_or_default()
    }

    /// The event as an html list item with season, event and country styles
    pub fn color_output(&self, event: &Event) -> String {
        format!(
            "<li class=\"{} {}\"><span class=\"{}\">{}</span></li>",
            season_class(event),
            event_class(event),
            escape_html(&self.country_class(event)),
            escape_html(&capfirst(&self.message(event))),
        )
    }

    /// The display sentence for an event
    pub fn message(&self, event: &Event) -> String {
        match &event.payload {
            EventPayload::NewUnit(e) => {
                format!("New {} in {}.", e.unit_type.label(), self.area(e.area))
            }
            EventPayload::Disband(e) => match e.country {
                Some(_) => format!(
                    "{} in {} is disbanded.",
                    e.unit_type.label(),
                    self.area(e.area)
                ),
                None => format!(
                    "Autonomous {} in {} is disbanded.",
                    e.unit_type.label(),
                    self.area(e.area)
                ),
            },
            EventPayload::Order(e) => self.order_message(e),
            EventPayload::Standoff(e) => {
                format!("Conflicts in {} result in a standoff.", self.area(e.area))
            }
            EventPayload::Conversion(e) => format!(
                "{} converts into {}.",
                self.unit(Some(e.before), Some(e.area)),
                e.after.label()
            ),
            EventPayload::Control(e) => self.control_message(e),
            EventPayload::Movement(e) => format!(
                "{} advances into {}.",
                self.unit(Some(e.unit_type), Some(e.origin)),
                self.area(e.destination)
            ),
            EventPayload::Retreat(e) => self.retreat_message(e),
            EventPayload::UnitCondition(e) => format!(
                "{} {}",
                self.unit(Some(e.unit_type), Some(e.area)),
                e.condition.label()
            ),
            EventPayload::CountryCondition(e) => {
                format!("{}: {}", self.country(e.country), e.condition.label())
            }
            EventPayload::Disaster(e) => {
                let area = self.area(e.area);
                match e.disaster {
                    DisasterKind::Famine => format!("{} is affected by famine.", area),
                    DisasterKind::Plague => format!("{} has been affected by plague.", area),
                    DisasterKind::Rebellion => format!("A rebellion has broken out in {}.", area),
                    DisasterKind::Storm => format!("{} is affected by a storm.", area),
                }
            }
            EventPayload::Income(e) => {
                format!("{} raises {} ducats.", self.country(e.country), e.ducats)
            }
            EventPayload::Expense(e) => self.expense_message(e),
            EventPayload::Uncover(e) => format!(
                "A spy from {} is uncovered in {}.",
                self.optional_country(e.country),
                self.area(e.area)
            ),
        }
    }

    fn order_message(&self, e: &OrderEvent) -> String {
        let unit = self.unit(Some(e.unit_type), Some(e.origin));
        let subunit = || self.unit(e.subtype, e.suborigin);

        match e.code {
            OrderCode::Hold => format!("{} holds its position.", unit),
            OrderCode::Advance => format!(
                "{} tries to go to {}.",
                unit,
                self.optional_area(e.destination)
            ),
            OrderCode::Besiege => format!("{} besieges the city.", unit),
            OrderCode::Conversion => format!(
                "{} tries to convert into {}.",
                unit,
                type_label(e.conversion)
            ),
            OrderCode::Convoy => format!(
                "{} must convoy {} to {}.",
                unit,
                subunit(),
                self.optional_area(e.subdestination)
            ),
            OrderCode::Support => match e.subcode {
                Some(OrderCode::Hold) => {
                    format!("{} supports {} to hold its position.", unit, subunit())
                }
                Some(OrderCode::Advance) => format!(
                    "{} supports {} to go to {}.",
                    unit,
                    subunit(),
                    self.optional_area(e.subdestination)
                ),
                Some(OrderCode::Conversion) => format!(
                    "{} supports {} to convert into {}.",
                    unit,
                    subunit(),
                    type_label(e.subconversion)
                ),
                _ => format!("{} supports {}.", unit, subunit()),
            },
        }
    }

    fn control_message(&self, e: &ControlEvent) -> String {
        if e.new_home {
            format!(
                "{} is now home of {}.",
                self.area(e.area),
                self.country(e.country)
            )
        } else {
            format!(
                "{} gets control of {}.",
                self.country(e.country),
                self.area(e.area)
            )
        }
    }

    fn retreat_message(&self, e: &UnitMoveEvent) -> String {
        let unit = self.unit(Some(e.unit_type), Some(e.origin));
        if e.origin == e.destination {
            format!("{} garrisons in the city.", unit)
        } else {
            format!("{} retreats to {}.", unit, self.area(e.destination))
        }
    }

    fn expense_message(&self, e: &ExpenseEvent) -> String {
        let country = self.country(e.country);
        let ducats = e.ducats;
        let area = || self.optional_area(e.area);
        let unit = || self.unit(e.unit_type, e.area);

        match e.expense {
            ExpenseKind::FamineRelief => {
                format!("{} pays {}d to relief famine in {}", country, ducats, area())
            }
            ExpenseKind::PacifyRebellion => format!(
                "{} pays {}d to pacify the rebellion in {}",
                country,
                ducats,
                area()
            ),
            ExpenseKind::ConqueredProvinceRebellion | ExpenseKind::HomeProvinceRebellion => {
                format!(
                    "{} pays {}d to cause a rebellion in {}",
                    country,
                    ducats,
                    area()
                )
            }
            ExpenseKind::CounterBribe => format!(
                "{} pays {}d to protect {} from bribes",
                country,
                ducats,
                unit()
            ),
            ExpenseKind::DisbandAutonomousGarrison | ExpenseKind::DisbandEnemyUnit => {
                format!("{} pays {}d to disband {}", country, ducats, unit())
            }
            ExpenseKind::BuyAutonomousGarrison | ExpenseKind::BuyEnemyUnit => {
                format!("{} pays {}d to buy {}", country, ducats, unit())
            }
            ExpenseKind::ConvertToAutonomous => format!(
                "{} pays {}d to turn {} into an autonomous garrison",
                country,
                ducats,
                unit()
            ),
            ExpenseKind::HireDiplomatOwnArea | ExpenseKind::HireDiplomatForeignArea => format!(
                "{} pays {}d to hire a diplomat in {}",
                country,
                ducats,
                area()
            ),
        }
    }

    fn unit(&self, unit_type: Option<UnitType>, area: Option<AreaId>) -> String {
        match unit_type {
            Some(unit_type) => unit_string(unit_type, &self.optional_area(area)),
            None => UNKNOWN_UNIT.to_string(),
        }
    }

    fn area(&self, id: AreaId) -> String {
        match self.scenario.area(id) {
            Some(area) => area.name.clone(),
            None => {
                tracing::debug!(area_id = %id, "Area missing from scenario");
                UNKNOWN_AREA.to_string()
            }
        }
    }

    fn optional_area(&self, id: Option<AreaId>) -> String {
        id.map(|id| self.area(id))
            .unwrap_or_else(|| UNKNOWN_AREA.to_string())
    }

    fn country(&self, id: CountryId) -> String {
        match self.scenario.country(id) {
            Some(country) => country.name.clone(),
            None => {
                tracing::debug!(country_id = %id, "Country missing from scenario");
                UNKNOWN_COUNTRY.to_string()
            }
        }
    }

    fn optional_country(&self, id: Option<CountryId>) -> String {
        id.map(|id| self.country(id))
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
    }
}

fn type_label(unit_type: Option<UnitType>) -> &'static str {
    unit_type.map(|t| t.label()).unwrap_or(UNKNOWN_TYPE)
}

/// Upper-case the first character
fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

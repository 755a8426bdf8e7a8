//! Message-code tables for condition, disaster and expense events
//!
//! Each table is stored as a small integer; the codes are fixed and must not
//! be renumbered once events have been written.

use serde::{Deserialize, Serialize};

/// Condition affecting a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCondition {
    SupportBroken,
    MustRetreat,
    Surrenders,
    Besieging,
    ChangedCountry,
    BecameAutonomous,
}

impl UnitCondition {
    pub fn code(&self) -> u8 {
        match self {
            UnitCondition::SupportBroken => 0,
            UnitCondition::MustRetreat => 1,
            UnitCondition::Surrenders => 2,
            UnitCondition::Besieging => 3,
            UnitCondition::ChangedCountry => 4,
            UnitCondition::BecameAutonomous => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(UnitCondition::SupportBroken),
            1 => Some(UnitCondition::MustRetreat),
            2 => Some(UnitCondition::Surrenders),
            3 => Some(UnitCondition::Besieging),
            4 => Some(UnitCondition::ChangedCountry),
            5 => Some(UnitCondition::BecameAutonomous),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitCondition::SupportBroken => "cannot carry out its support order.",
            UnitCondition::MustRetreat => "must retreat.",
            UnitCondition::Surrenders => "surrenders.",
            UnitCondition::Besieging => "is now besieging.",
            UnitCondition::ChangedCountry => "changes of country.",
            UnitCondition::BecameAutonomous => "becomes autonomous.",
        }
    }
}

/// Condition affecting a whole country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryCondition {
    GovernmentOverthrown,
    Conquered,
    Excommunicated,
    Eliminated,
    LeaderAssassinated,
    ExcommunicationLifted,
    AssassinationAttempted,
}

impl CountryCondition {
    pub fn code(&self) -> u8 {
        match self {
            CountryCondition::GovernmentOverthrown => 0,
            CountryCondition::Conquered => 1,
            CountryCondition::Excommunicated => 2,
            CountryCondition::Eliminated => 3,
            CountryCondition::LeaderAssassinated => 4,
            CountryCondition::ExcommunicationLifted => 5,
            CountryCondition::AssassinationAttempted => 6,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CountryCondition::GovernmentOverthrown),
            1 => Some(CountryCondition::Conquered),
            2 => Some(CountryCondition::Excommunicated),
            3 => Some(CountryCondition::Eliminated),
            4 => Some(CountryCondition::LeaderAssassinated),
            5 => Some(CountryCondition::ExcommunicationLifted),
            6 => Some(CountryCondition::AssassinationAttempted),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountryCondition::GovernmentOverthrown => "Government has been overthrown",
            CountryCondition::Conquered => "Has been conquered",
            CountryCondition::Excommunicated => "Has been declared enemy of Christendom",
            CountryCondition::Eliminated => "Has been eliminated",
            CountryCondition::LeaderAssassinated => "Leader has been assassinated",
            CountryCondition::ExcommunicationLifted => "Excommunication has been lifted",
            CountryCondition::AssassinationAttempted => "Leader suffered an assassination attempt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterKind {
    Famine,
    Plague,
    Rebellion,
    Storm,
}

impl DisasterKind {
    pub fn code(&self) -> u8 {
        match self {
            DisasterKind::Famine => 0,
            DisasterKind::Plague => 1,
            DisasterKind::Rebellion => 2,
            DisasterKind::Storm => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DisasterKind::Famine),
            1 => Some(DisasterKind::Plague),
            2 => Some(DisasterKind::Rebellion),
            3 => Some(DisasterKind::Storm),
            _ => None,
        }
    }
}

/// What a country spent ducats on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    FamineRelief,
    PacifyRebellion,
    ConqueredProvinceRebellion,
    HomeProvinceRebellion,
    CounterBribe,
    DisbandAutonomousGarrison,
    BuyAutonomousGarrison,
    ConvertToAutonomous,
    DisbandEnemyUnit,
    BuyEnemyUnit,
    HireDiplomatOwnArea,
    HireDiplomatForeignArea,
}

impl ExpenseKind {
    pub fn code(&self) -> u8 {
        match self {
            ExpenseKind::FamineRelief => 0,
            ExpenseKind::PacifyRebellion => 1,
            ExpenseKind::ConqueredProvinceRebellion => 2,
            ExpenseKind::HomeProvinceRebellion => 3,
            ExpenseKind::CounterBribe => 4,
            ExpenseKind::DisbandAutonomousGarrison => 5,
            ExpenseKind::BuyAutonomousGarrison => 6,
            ExpenseKind::ConvertToAutonomous => 7,
            ExpenseKind::DisbandEnemyUnit => 8,
            ExpenseKind::BuyEnemyUnit => 9,
            ExpenseKind::HireDiplomatOwnArea => 10,
            ExpenseKind::HireDiplomatForeignArea => 11,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ExpenseKind::FamineRelief),
            1 => Some(ExpenseKind::PacifyRebellion),
            2 => Some(ExpenseKind::ConqueredProvinceRebellion),
            3 => Some(ExpenseKind::HomeProvinceRebellion),
            4 => Some(ExpenseKind::CounterBribe),
            5 => Some(ExpenseKind::DisbandAutonomousGarrison),
            6 => Some(ExpenseKind::BuyAutonomousGarrison),
            7 => Some(ExpenseKind::ConvertToAutonomous),
            8 => Some(ExpenseKind::DisbandEnemyUnit),
            9 => Some(ExpenseKind::BuyEnemyUnit),
            10 => Some(ExpenseKind::HireDiplomatOwnArea),
            11 => Some(ExpenseKind::HireDiplomatForeignArea),
            _ => None,
        }
    }

    /// Whether the expense targets a unit rather than an area
    pub fn targets_unit(&self) -> bool {
        matches!(
            self,
            ExpenseKind::CounterBribe
                | ExpenseKind::DisbandAutonomousGarrison
                | ExpenseKind::BuyAutonomousGarrison
                | ExpenseKind::ConvertToAutonomous
                | ExpenseKind::DisbandEnemyUnit
                | ExpenseKind::BuyEnemyUnit
        )
    }
}

//! Unit types and order codes, stored as single characters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Army,
    Fleet,
    Garrison,
}

impl UnitType {
    pub fn code(&self) -> char {
        match self {
            UnitType::Army => 'A',
            UnitType::Fleet => 'F',
            UnitType::Garrison => 'G',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(UnitType::Army),
            'F' => Some(UnitType::Fleet),
            'G' => Some(UnitType::Garrison),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Army => "Army",
            UnitType::Fleet => "Fleet",
            UnitType::Garrison => "Garrison",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderCode {
    Hold,
    Besiege,
    Advance,
    Conversion,
    Convoy,
    Support,
}

impl OrderCode {
    pub fn code(&self) -> char {
        match self {
            OrderCode::Hold => 'H',
            OrderCode::Besiege => 'B',
            OrderCode::Advance => '-',
            OrderCode::Conversion => '=',
            OrderCode::Convoy => 'C',
            OrderCode::Support => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'H' => Some(OrderCode::Hold),
            'B' => Some(OrderCode::Besiege),
            '-' => Some(OrderCode::Advance),
            '=' => Some(OrderCode::Conversion),
            'C' => Some(OrderCode::Convoy),
            'S' => Some(OrderCode::Support),
            _ => None,
        }
    }
}

//! Scenario reference data: map areas and playable countries
//!
//! These records belong to the scenario collaborator. Events only keep their
//! ids and resolve names at render time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AreaId, CountryId};

/// A named province or sea zone of the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    /// Short map code, e.g. "VEN"
    pub code: String,
    pub name: String,
}

impl Area {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AreaId::new(),
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A playable faction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    /// Locale independent identifier, used as css class
    pub static_name: String,
}

impl Country {
    pub fn new(name: impl Into<String>, static_name: impl Into<String>) -> Self {
        Self {
            id: CountryId::new(),
            name: name.into(),
            static_name: static_name.into(),
        }
    }
}

/// In-memory lookup of the areas and countries of one scenario
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    areas: HashMap<AreaId, Area>,
    countries: HashMap<CountryId, Country>,
}

impl ScenarioCatalog {
    pub fn new(areas: Vec<Area>, countries: Vec<Country>) -> Self {
        Self {
            areas: areas.into_iter().map(|a| (a.id, a)).collect(),
            countries: countries.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.areas.insert(area.id, area);
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.countries.insert(country.id, country);
        self
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(&id)
    }
}

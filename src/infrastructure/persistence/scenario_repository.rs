//! SQLite store of scenario areas and countries used to name log lines

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::columns;
use crate::application::ports::outbound::{ScenarioRepositoryPort, StoreError};
use crate::domain::entities::{Area, Country, ScenarioCatalog};

pub struct SqliteScenarioRepository {
    pool: SqlitePool,
}

impl SqliteScenarioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScenarioRepositoryPort for SqliteScenarioRepository {
    async fn save_area(&self, area: &Area) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO areas (id, code, name) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET code = excluded.code, name = excluded.name",
        )
        .bind(area.id.to_string())
        .bind(&area.code)
        .bind(&area.name)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("save_area", e))?;
        Ok(())
    }

    async fn save_country(&self, country: &Country) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO countries (id, name, static_name) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, static_name = excluded.static_name",
        )
        .bind(country.id.to_string())
        .bind(&country.name)
        .bind(&country.static_name)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("save_country", e))?;
        Ok(())
    }

    async fn load_catalog(&self) -> Result<ScenarioCatalog, StoreError> {
        let area_rows = sqlx::query("SELECT id, code, name FROM areas")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database("load_areas", e))?;
        let country_rows = sqlx::query("SELECT id, name, static_name FROM countries")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database("load_countries", e))?;

        let areas = area_rows
            .iter()
            .map(|row| {
                Ok(Area {
                    id: columns::id(row, "id")?,
                    code: columns::text(row, "code")?,
                    name: columns::text(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        let countries = country_rows
            .iter()
            .map(|row| {
                Ok(Country {
                    id: columns::id(row, "id")?,
                    name: columns::text(row, "name")?,
                    static_name: columns::text(row, "static_name")?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(ScenarioCatalog::new(areas, countries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::SqliteRepository;

    #[tokio::test]
    async fn test_catalog_roundtrip() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let scenarios = repo.scenarios();
        let mut venice = Area::new("VEN", "Venice");
        let milan = Country::new("Milan", "milan");

        scenarios.save_area(&venice).await.unwrap();
        scenarios.save_country(&milan).await.unwrap();

        venice.name = "Venezia".to_string();
        scenarios.save_area(&venice).await.unwrap();

        let catalog = scenarios.load_catalog().await.unwrap();
        assert_eq!(catalog.area(venice.id).map(|a| a.name.as_str()), Some("Venezia"));
        assert_eq!(catalog.country(milan.id), Some(&milan));
    }
}

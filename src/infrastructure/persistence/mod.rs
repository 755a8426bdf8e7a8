//! SQLite persistence adapters
//!
//! Implements the storage ports for events, games and scenario data on a
//! single connection pool.

mod columns;
mod event_repository;
mod game_repository;
mod scenario_repository;
mod schema;

pub use event_repository::SqliteEventRepository;
pub use game_repository::SqliteGameRepository;
pub use scenario_repository::SqliteScenarioRepository;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Combined repository providing access to all SQLite repositories
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open (or create) the database and bring its schema up to date
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite")?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, one connection so every query sees the same data
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory database URL")?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite")?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        schema::initialize(&pool)
            .await
            .context("Failed to initialize schema")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn events(&self) -> SqliteEventRepository {
        SqliteEventRepository::new(self.pool.clone())
    }

    pub fn games(&self) -> SqliteGameRepository {
        SqliteGameRepository::new(self.pool.clone())
    }

    pub fn scenarios(&self) -> SqliteScenarioRepository {
        SqliteScenarioRepository::new(self.pool.clone())
    }
}

//! SQLite mirror of the engine's games

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::columns::{self, format_timestamp};
use crate::application::ports::outbound::{GameRepositoryPort, StoreError};
use crate::domain::entities::Game;
use crate::domain::value_objects::{GameId, Phase, Season};

pub struct SqliteGameRepository {
    pool: SqlitePool,
}

impl SqliteGameRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_game(row: &SqliteRow) -> Result<Game, StoreError> {
    Ok(Game {
        id: columns::id(row, "id")?,
        year: columns::count(row, "year")?,
        season: columns::code(row, "season", Season::from_number)?,
        phase: columns::code(row, "phase", Phase::from_number)?,
        slots: columns::count(row, "slots")?,
        last_phase_change: columns::timestamp(row, "last_phase_change")?,
    })
}

#[async_trait]
impl GameRepositoryPort for SqliteGameRepository {
    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        // An upsert, not INSERT OR REPLACE: replacing the row would cascade into its events
        sqlx::query(
            r#"
            INSERT INTO games (id, year, season, phase, slots, last_phase_change)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                year = excluded.year,
                season = excluded.season,
                phase = excluded.phase,
                slots = excluded.slots,
                last_phase_change = excluded.last_phase_change
            "#,
        )
        .bind(game.id.to_string())
        .bind(i64::from(game.year))
        .bind(i64::from(game.season.number()))
        .bind(i64::from(game.phase.number()))
        .bind(i64::from(game.slots))
        .bind(format_timestamp(game.last_phase_change))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("save_game", e))?;

        Ok(())
    }

    async fn get(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        let row = sqlx::query(
            "SELECT id, year, season, phase, slots, last_phase_change FROM games WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::database("get_game", e))?;

        row.as_ref().map(row_to_game).transpose()
    }

    async fn delete(&self, id: GameId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::database("delete_game", e))?;

        Ok(result.rows_affected() > 0)
    }
}

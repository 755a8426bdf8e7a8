//! SQLite event store
//!
//! Base rows live in `events`, payloads in one table per kind. A payload is
//! written in the same transaction as its base row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::warn;

use super::columns::{self, format_timestamp, unit_code};
use super::schema::kind_table;
use crate::application::ports::outbound::{EventFilter, EventStorePort, StoreError};
use crate::domain::entities::{
    ControlEvent, ConversionEvent, CountryConditionEvent, DisasterEvent, DisbandEvent, Event,
    EventKind, EventPayload, ExpenseEvent, IncomeEvent, NewEvent, NewUnitEvent, OrderEvent,
    StandoffEvent, UncoverEvent, UnitConditionEvent, UnitMoveEvent,
};
use crate::domain::value_objects::{
    CountryCondition, DisasterKind, EventId, ExpenseKind, GameId, Phase, Season, UnitCondition,
};

/// Ids per `IN (...)` clause when loading payloads
const PAYLOAD_BATCH: usize = 500;

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load the payloads of the given events, keyed by event id
    async fn load_payloads(
        &self,
        kind: EventKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, EventPayload>, StoreError> {
        let mut payloads = HashMap::with_capacity(ids.len());

        for batch in ids.chunks(PAYLOAD_BATCH) {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "SELECT * FROM {} WHERE event_id IN (",
                kind_table(kind)
            ));
            let mut separated = query.separated(", ");
            for id in batch {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let rows = query
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::database("load_payloads", e))?;

            for row in rows {
                let event_id = columns::integer(&row, "event_id")?;
                payloads.insert(event_id, decode_payload(kind, &row)?);
            }
        }

        Ok(payloads)
    }
}

/// The `events` row of an event
struct BaseRow {
    id: EventId,
    game_id: GameId,
    year: u32,
    season: Season,
    phase: Phase,
    kind: EventKind,
}

impl BaseRow {
    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        let kind_name = columns::text(row, "kind")?;
        let kind = EventKind::parse(&kind_name)
            .ok_or_else(|| StoreError::corrupt(format!("kind: unknown event kind {:?}", kind_name)))?;

        Ok(Self {
            id: EventId::new(columns::integer(row, "id")?),
            game_id: columns::id(row, "game_id")?,
            year: columns::count(row, "year")?,
            season: columns::code(row, "season", Season::from_number)?,
            phase: columns::code(row, "phase", Phase::from_number)?,
            kind,
        })
    }

    fn into_event(self, payload: EventPayload) -> Event {
        Event {
            id: self.id,
            game_id: self.game_id,
            year: self.year,
            season: self.season,
            phase: self.phase,
            payload,
        }
    }
}

fn decode_payload(kind: EventKind, row: &SqliteRow) -> Result<EventPayload, StoreError> {
    let payload = match kind {
        EventKind::NewUnit => EventPayload::NewUnit(NewUnitEvent {
            country: columns::id(row, "country_id")?,
            unit_type: columns::unit_type(row, "unit_type")?,
            area: columns::id(row, "area_id")?,
        }),
        EventKind::Disband => EventPayload::Disband(DisbandEvent {
            country: columns::optional_id(row, "country_id")?,
            unit_type: columns::unit_type(row, "unit_type")?,
            area: columns::id(row, "area_id")?,
        }),
        EventKind::Order => EventPayload::Order(OrderEvent {
            country: columns::id(row, "country_id")?,
            unit_type: columns::unit_type(row, "unit_type")?,
            origin: columns::id(row, "origin_id")?,
            code: columns::order_code(row, "code")?,
            destination: columns::optional_id(row, "destination_id")?,
            conversion: columns::optional_unit_type(row, "conversion")?,
            subtype: columns::optional_unit_type(row, "subtype")?,
            suborigin: columns::optional_id(row, "suborigin_id")?,
            subcode: columns::optional_order_code(row, "subcode")?,
            subdestination: columns::optional_id(row, "subdestination_id")?,
            subconversion: columns::optional_unit_type(row, "subconversion")?,
        }),
        EventKind::Standoff => EventPayload::Standoff(StandoffEvent {
            area: columns::id(row, "area_id")?,
        }),
        EventKind::Conversion => EventPayload::Conversion(ConversionEvent {
            country: columns::optional_id(row, "country_id")?,
            area: columns::id(row, "area_id")?,
            before: columns::unit_type(row, "before_type")?,
            after: columns::unit_type(row, "after_type")?,
        }),
        EventKind::Control => EventPayload::Control(ControlEvent {
            country: columns::id(row, "country_id")?,
            area: columns::id(row, "area_id")?,
            new_home: columns::integer(row, "new_home")? != 0,
        }),
        EventKind::Movement => EventPayload::Movement(decode_move(row)?),
        EventKind::Retreat => EventPayload::Retreat(decode_move(row)?),
        EventKind::UnitCondition => EventPayload::UnitCondition(UnitConditionEvent {
            country: columns::optional_id(row, "country_id")?,
            unit_type: columns::unit_type(row, "unit_type")?,
            area: columns::id(row, "area_id")?,
            condition: columns::code(row, "message", UnitCondition::from_code)?,
        }),
        EventKind::CountryCondition => EventPayload::CountryCondition(CountryConditionEvent {
            country: columns::id(row, "country_id")?,
            condition: columns::code(row, "message", CountryCondition::from_code)?,
        }),
        EventKind::Disaster => EventPayload::Disaster(DisasterEvent {
            area: columns::id(row, "area_id")?,
            disaster: columns::code(row, "message", DisasterKind::from_code)?,
        }),
        EventKind::Income => EventPayload::Income(IncomeEvent {
            country: columns::id(row, "country_id")?,
            ducats: columns::count(row, "ducats")?,
        }),
        EventKind::Expense => EventPayload::Expense(ExpenseEvent {
            country: columns::id(row, "country_id")?,
            ducats: columns::count(row, "ducats")?,
            expense: columns::code(row, "expense_type", ExpenseKind::from_code)?,
            area: columns::optional_id(row, "area_id")?,
            unit_type: columns::optional_unit_type(row, "unit_type")?,
        }),
        EventKind::Uncover => EventPayload::Uncover(UncoverEvent {
            country: columns::optional_id(row, "country_id")?,
            area: columns::id(row, "area_id")?,
        }),
    };
    Ok(payload)
}

fn decode_move(row: &SqliteRow) -> Result<UnitMoveEvent, StoreError> {
    Ok(UnitMoveEvent {
        country: columns::optional_id(row, "country_id")?,
        unit_type: columns::unit_type(row, "unit_type")?,
        origin: columns::id(row, "origin_id")?,
        destination: columns::id(row, "destination_id")?,
    })
}

/// Write the kind record of a freshly inserted base row
async fn insert_payload(
    conn: &mut SqliteConnection,
    event_id: i64,
    payload: &EventPayload,
) -> Result<(), sqlx::Error> {
    match payload {
        EventPayload::NewUnit(e) => {
            sqlx::query(
                "INSERT INTO new_unit_events (event_id, country_id, unit_type, area_id) VALUES (?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.to_string())
            .bind(unit_code(e.unit_type))
            .bind(e.area.to_string())
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Disband(e) => {
            sqlx::query(
                "INSERT INTO disband_events (event_id, country_id, unit_type, area_id) VALUES (?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.map(|c| c.to_string()))
            .bind(unit_code(e.unit_type))
            .bind(e.area.to_string())
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Order(e) => {
            sqlx::query(
                r#"
                INSERT INTO order_events (
                    event_id, country_id, unit_type, origin_id, code, destination_id, conversion,
                    subtype, suborigin_id, subcode, subdestination_id, subconversion
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(event_id)
            .bind(e.country.to_string())
            .bind(unit_code(e.unit_type))
            .bind(e.origin.to_string())
            .bind(e.code.code().to_string())
            .bind(e.destination.map(|a| a.to_string()))
            .bind(e.conversion.map(unit_code))
            .bind(e.subtype.map(unit_code))
            .bind(e.suborigin.map(|a| a.to_string()))
            .bind(e.subcode.map(|c| c.code().to_string()))
            .bind(e.subdestination.map(|a| a.to_string()))
            .bind(e.subconversion.map(unit_code))
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Standoff(e) => {
            sqlx::query("INSERT INTO standoff_events (event_id, area_id) VALUES (?, ?)")
                .bind(event_id)
                .bind(e.area.to_string())
                .execute(&mut *conn)
                .await?;
        }
        EventPayload::Conversion(e) => {
            sqlx::query(
                "INSERT INTO conversion_events (event_id, country_id, area_id, before_type, after_type) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.map(|c| c.to_string()))
            .bind(e.area.to_string())
            .bind(unit_code(e.before))
            .bind(unit_code(e.after))
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Control(e) => {
            sqlx::query(
                "INSERT INTO control_events (event_id, country_id, area_id, new_home) VALUES (?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.to_string())
            .bind(e.area.to_string())
            .bind(e.new_home)
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Movement(e) | EventPayload::Retreat(e) => {
            let sql = format!(
                "INSERT INTO {} (event_id, country_id, unit_type, origin_id, destination_id) VALUES (?, ?, ?, ?, ?)",
                kind_table(payload.kind())
            );
            sqlx::query(&sql)
                .bind(event_id)
                .bind(e.country.map(|c| c.to_string()))
                .bind(unit_code(e.unit_type))
                .bind(e.origin.to_string())
                .bind(e.destination.to_string())
                .execute(&mut *conn)
                .await?;
        }
        EventPayload::UnitCondition(e) => {
            sqlx::query(
                "INSERT INTO unit_condition_events (event_id, country_id, unit_type, area_id, message) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.map(|c| c.to_string()))
            .bind(unit_code(e.unit_type))
            .bind(e.area.to_string())
            .bind(i64::from(e.condition.code()))
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::CountryCondition(e) => {
            sqlx::query(
                "INSERT INTO country_condition_events (event_id, country_id, message) VALUES (?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.to_string())
            .bind(i64::from(e.condition.code()))
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Disaster(e) => {
            sqlx::query("INSERT INTO disaster_events (event_id, area_id, message) VALUES (?, ?, ?)")
                .bind(event_id)
                .bind(e.area.to_string())
                .bind(i64::from(e.disaster.code()))
                .execute(&mut *conn)
                .await?;
        }
        EventPayload::Income(e) => {
            sqlx::query("INSERT INTO income_events (event_id, country_id, ducats) VALUES (?, ?, ?)")
                .bind(event_id)
                .bind(e.country.to_string())
                .bind(i64::from(e.ducats))
                .execute(&mut *conn)
                .await?;
        }
        EventPayload::Expense(e) => {
            sqlx::query(
                "INSERT INTO expense_events (event_id, country_id, ducats, expense_type, area_id, unit_type) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(event_id)
            .bind(e.country.to_string())
            .bind(i64::from(e.ducats))
            .bind(i64::from(e.expense.code()))
            .bind(e.area.map(|a| a.to_string()))
            .bind(e.unit_type.map(unit_code))
            .execute(&mut *conn)
            .await?;
        }
        EventPayload::Uncover(e) => {
            sqlx::query("INSERT INTO uncover_events (event_id, country_id, area_id) VALUES (?, ?, ?)")
                .bind(event_id)
                .bind(e.country.map(|c| c.to_string()))
                .bind(e.area.to_string())
                .execute(&mut *conn)
                .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl EventStorePort for SqliteEventRepository {
    async fn insert(&self, event: &NewEvent) -> Result<EventId, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::database("insert_event", e))?;

        let result = sqlx::query(
            "INSERT INTO events (game_id, year, season, phase, kind) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(event.game_id.to_string())
        .bind(i64::from(event.year))
        .bind(i64::from(event.season.number()))
        .bind(i64::from(event.phase.number()))
        .bind(event.payload.kind().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::database("insert_event", e))?;

        let event_id = result.last_insert_rowid();
        insert_payload(&mut *tx, event_id, &event.payload)
            .await
            .map_err(|e| StoreError::database("insert_event_payload", e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::database("insert_event", e))?;

        Ok(EventId::new(event_id))
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let row = sqlx::query("SELECT id, game_id, year, season, phase, kind FROM events WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("get_event", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let base = BaseRow::from_row(&row)?;

        let sql = format!("SELECT * FROM {} WHERE event_id = ?", kind_table(base.kind));
        let payload_row = sqlx::query(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("get_event_payload", e))?
            .ok_or(StoreError::MissingPayload {
                event_id: base.id,
                kind: base.kind,
            })?;

        let payload = decode_payload(base.kind, &payload_row)?;
        Ok(Some(base.into_event(payload)))
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, game_id, year, season, phase, kind FROM events WHERE game_id = ",
        );
        query.push_bind(filter.game_id.to_string());
        if let Some(kind) = filter.kind {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(i64::from(year));
        }
        if let Some(season) = filter.season {
            query.push(" AND season = ").push_bind(i64::from(season.number()));
        }
        if let Some(phase) = filter.phase {
            query.push(" AND phase = ").push_bind(i64::from(phase.number()));
        }
        query.push(" ORDER BY year DESC, season DESC, id DESC");
        // Payload filters shrink the result after loading, so the limit moves to Rust
        if let (Some(limit), true) = (filter.limit, filter.is_base_only()) {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database("list_events", e))?;

        let bases = rows
            .iter()
            .map(BaseRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids_by_kind: HashMap<EventKind, Vec<i64>> = HashMap::new();
        for base in &bases {
            ids_by_kind.entry(base.kind).or_default().push(base.id.value());
        }

        let mut payloads = HashMap::with_capacity(bases.len());
        for (kind, ids) in ids_by_kind {
            payloads.extend(self.load_payloads(kind, &ids).await?);
        }

        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let mut events = Vec::with_capacity(bases.len().min(limit));
        for base in bases {
            if events.len() >= limit {
                break;
            }
            let Some(payload) = payloads.remove(&base.id.value()) else {
                warn!(event_id = %base.id, kind = %base.kind, "Skipping event without kind record");
                continue;
            };
            if filter.matches_payload(&payload) {
                events.push(base.into_event(payload));
            }
        }

        Ok(events)
    }

    async fn delete_for_finished_games(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        // Finished: inactive with no slot waiting for a player
        let result = sqlx::query(
            r#"
            DELETE FROM events WHERE game_id IN (
                SELECT id FROM games
                WHERE phase = 0 AND slots = 0 AND last_phase_change < ?
            )
            "#,
        )
        .bind(format_timestamp(cutoff))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("delete_old_events", e))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::GameRepositoryPort;
    use crate::domain::entities::Game;
    use crate::domain::value_objects::{AreaId, CountryId, OrderCode, UnitType};
    use crate::infrastructure::persistence::SqliteRepository;
    use chrono::Duration;

    async fn setup() -> (SqliteRepository, Game) {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let game = Game::new(1454, Season::Spring, Phase::Orders);
        repo.games().save(&game).await.unwrap();
        (repo, game)
    }

    fn at(game: &Game, year: u32, season: Season, payload: EventPayload) -> NewEvent {
        NewEvent {
            game_id: game.id,
            year,
            season,
            phase: Phase::Orders,
            payload,
        }
    }

    fn standoff() -> EventPayload {
        EventPayload::Standoff(StandoffEvent { area: AreaId::new() })
    }

    #[tokio::test]
    async fn test_insert_and_get_order() {
        let (repo, game) = setup().await;
        let events = repo.events();

        let payload = EventPayload::Order(OrderEvent {
            country: CountryId::new(),
            unit_type: UnitType::Army,
            origin: AreaId::new(),
            code: OrderCode::Support,
            destination: None,
            conversion: None,
            subtype: Some(UnitType::Fleet),
            suborigin: Some(AreaId::new()),
            subcode: Some(OrderCode::Advance),
            subdestination: Some(AreaId::new()),
            subconversion: None,
        });
        let new_event = NewEvent::for_game(&game, payload);
        let id = events.insert(&new_event).await.unwrap();

        let stored = events.get(id).await.unwrap().unwrap();
        assert_eq!(stored, new_event.into_event(id));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let (repo, _) = setup().await;
        assert!(repo.events().get(EventId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (repo, game) = setup().await;
        let events = repo.events();

        let a = events.insert(&at(&game, 1454, Season::Spring, standoff())).await.unwrap();
        let b = events.insert(&at(&game, 1454, Season::Fall, standoff())).await.unwrap();
        let c = events.insert(&at(&game, 1455, Season::Spring, standoff())).await.unwrap();
        let d = events.insert(&at(&game, 1454, Season::Fall, standoff())).await.unwrap();

        let listed: Vec<EventId> = events
            .list(&EventFilter::for_game(game.id))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(listed, vec![c, d, b, a]);

        let limited = events
            .list(&EventFilter::for_game(game.id).with_limit(2))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, c);
    }

    #[tokio::test]
    async fn test_list_filters_by_kind_country_and_message() {
        let (repo, game) = setup().await;
        let events = repo.events();
        let venice = CountryId::new();
        let area = AreaId::new();

        events.insert(&NewEvent::for_game(&game, standoff())).await.unwrap();
        let famine = events
            .insert(&NewEvent::for_game(
                &game,
                EventPayload::Disaster(DisasterEvent {
                    area,
                    disaster: DisasterKind::Famine,
                }),
            ))
            .await
            .unwrap();
        let retreat = events
            .insert(&NewEvent::for_game(
                &game,
                EventPayload::UnitCondition(UnitConditionEvent {
                    country: Some(venice),
                    unit_type: UnitType::Army,
                    area,
                    condition: UnitCondition::MustRetreat,
                }),
            ))
            .await
            .unwrap();
        events
            .insert(&NewEvent::for_game(
                &game,
                EventPayload::Income(IncomeEvent {
                    country: CountryId::new(),
                    ducats: 9,
                }),
            ))
            .await
            .unwrap();

        let mut filter = EventFilter::for_game(game.id);
        filter.kind = Some(EventKind::Disaster);
        let found = events.list(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, famine);

        let mut filter = EventFilter::for_game(game.id);
        filter.country = Some(venice);
        let found = events.list(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, retreat);

        let mut filter = EventFilter::for_game(game.id);
        filter.kind = Some(EventKind::UnitCondition);
        filter.message = Some(UnitCondition::MustRetreat.code());
        let found = events.list(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, retreat);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_game() {
        let (repo, game) = setup().await;
        let other = Game::new(1460, Season::Summer, Phase::Movement);
        repo.games().save(&other).await.unwrap();
        let events = repo.events();

        events.insert(&NewEvent::for_game(&game, standoff())).await.unwrap();
        events.insert(&NewEvent::for_game(&other, standoff())).await.unwrap();

        let listed = events.list(&EventFilter::for_game(other.id)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].game_id, other.id);
        assert_eq!(listed[0].year, 1460);
    }

    #[tokio::test]
    async fn test_missing_kind_record() {
        let (repo, game) = setup().await;
        let events = repo.events();
        let kept = events.insert(&NewEvent::for_game(&game, standoff())).await.unwrap();
        let broken = events.insert(&NewEvent::for_game(&game, standoff())).await.unwrap();

        sqlx::query("DELETE FROM standoff_events WHERE event_id = ?")
            .bind(broken.value())
            .execute(repo.pool())
            .await
            .unwrap();

        let err = events.get(broken).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingPayload { kind: EventKind::Standoff, .. }));

        let listed = events.list(&EventFilter::for_game(game.id)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept);
    }

    #[tokio::test]
    async fn test_failed_payload_insert_leaves_no_base_row() {
        let (repo, game) = setup().await;
        sqlx::query("DROP TABLE uncover_events")
            .execute(repo.pool())
            .await
            .unwrap();

        let events = repo.events();
        let result = events
            .insert(&NewEvent::for_game(
                &game,
                EventPayload::Uncover(UncoverEvent {
                    country: None,
                    area: AreaId::new(),
                }),
            ))
            .await;
        assert!(result.is_err());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_insert_for_unknown_game_fails() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let game = Game::new(1454, Season::Spring, Phase::Orders);
        let result = repo.events().insert(&NewEvent::for_game(&game, standoff())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_for_finished_games_is_selective() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let now = Utc::now();
        let events = repo.events();

        let old_finished = Game::new(1480, Season::Fall, Phase::Inactive)
            .with_last_phase_change(now - Duration::days(40));
        let recent_finished = Game::new(1470, Season::Fall, Phase::Inactive)
            .with_last_phase_change(now - Duration::days(5));
        let old_running = Game::new(1460, Season::Spring, Phase::Orders)
            .with_last_phase_change(now - Duration::days(40));
        let old_waiting = Game::new(1454, Season::Spring, Phase::Inactive)
            .with_slots(3)
            .with_last_phase_change(now - Duration::days(40));

        for game in [&old_finished, &recent_finished, &old_running, &old_waiting] {
            repo.games().save(game).await.unwrap();
            for _ in 0..2 {
                events.insert(&NewEvent::for_game(game, standoff())).await.unwrap();
            }
        }

        let cutoff = now - Duration::days(30);
        assert_eq!(events.delete_for_finished_games(cutoff).await.unwrap(), 2);
        assert_eq!(events.delete_for_finished_games(cutoff).await.unwrap(), 0);

        assert!(events.list(&EventFilter::for_game(old_finished.id)).await.unwrap().is_empty());
        for game in [&recent_finished, &old_running, &old_waiting] {
            assert_eq!(events.list(&EventFilter::for_game(game.id)).await.unwrap().len(), 2);
        }

        let (orphans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM standoff_events")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 6);
    }
}

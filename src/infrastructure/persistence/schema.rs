//! SQLite schema for the event log
//!
//! One base `events` row per event with a `kind` discriminator, and one child
//! table per kind keyed by the base row id. Child rows go away with their base
//! row, base rows go away with their game.

use sqlx::SqlitePool;

use crate::domain::entities::EventKind;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS games (
        id TEXT PRIMARY KEY,
        year INTEGER NOT NULL,
        season INTEGER NOT NULL,
        phase INTEGER NOT NULL,
        slots INTEGER NOT NULL DEFAULT 0,
        last_phase_change TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS areas (
        id TEXT PRIMARY KEY,
        code TEXT NOT NULL,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS countries (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        static_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        game_id TEXT NOT NULL REFERENCES games(id) ON DELETE CASCADE,
        year INTEGER NOT NULL CHECK (year > 0),
        season INTEGER NOT NULL CHECK (season BETWEEN 1 AND 3),
        phase INTEGER NOT NULL CHECK (phase BETWEEN 0 AND 4),
        kind TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_events_game_order
    ON events(game_id, year DESC, season DESC, id DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS new_unit_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        area_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disband_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        area_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        origin_id TEXT NOT NULL,
        code TEXT NOT NULL CHECK (code IN ('H', 'B', '-', '=', 'C', 'S')),
        destination_id TEXT,
        conversion TEXT,
        subtype TEXT,
        suborigin_id TEXT,
        subcode TEXT,
        subdestination_id TEXT,
        subconversion TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS standoff_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        area_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS conversion_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        area_id TEXT NOT NULL,
        before_type TEXT NOT NULL CHECK (before_type IN ('A', 'F', 'G')),
        after_type TEXT NOT NULL CHECK (after_type IN ('A', 'F', 'G'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS control_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        area_id TEXT NOT NULL,
        new_home INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movement_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        origin_id TEXT NOT NULL,
        destination_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS retreat_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        origin_id TEXT NOT NULL,
        destination_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS unit_condition_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        unit_type TEXT NOT NULL CHECK (unit_type IN ('A', 'F', 'G')),
        area_id TEXT NOT NULL,
        message INTEGER NOT NULL CHECK (message BETWEEN 0 AND 5)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS country_condition_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        message INTEGER NOT NULL CHECK (message BETWEEN 0 AND 6)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS disaster_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        area_id TEXT NOT NULL,
        message INTEGER NOT NULL CHECK (message BETWEEN 0 AND 3)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS income_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        ducats INTEGER NOT NULL CHECK (ducats >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS expense_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT NOT NULL,
        ducats INTEGER NOT NULL DEFAULT 0 CHECK (ducats >= 0),
        expense_type INTEGER NOT NULL CHECK (expense_type BETWEEN 0 AND 11),
        area_id TEXT,
        unit_type TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS uncover_events (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        country_id TEXT,
        area_id TEXT NOT NULL
    )
    "#,
];

/// Child table holding the payload of each event kind
pub fn kind_table(kind: EventKind) -> &'static str {
    match kind {
        EventKind::NewUnit => "new_unit_events",
        EventKind::Disband => "disband_events",
        EventKind::Order => "order_events",
        EventKind::Standoff => "standoff_events",
        EventKind::Conversion => "conversion_events",
        EventKind::Control => "control_events",
        EventKind::Movement => "movement_events",
        EventKind::Retreat => "retreat_events",
        EventKind::UnitCondition => "unit_condition_events",
        EventKind::CountryCondition => "country_condition_events",
        EventKind::Disaster => "disaster_events",
        EventKind::Income => "income_events",
        EventKind::Expense => "expense_events",
        EventKind::Uncover => "uncover_events",
    }
}

/// Create all tables and indexes that do not exist yet
pub async fn initialize(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

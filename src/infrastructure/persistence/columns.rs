//! Column decoding helpers shared by the SQLite repositories

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::application::ports::outbound::StoreError;
use crate::domain::value_objects::{OrderCode, UnitType};

/// Timestamps are stored as fixed-width RFC 3339 text so that string order is time order
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, StoreError> {
    let raw: String = text(row, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
}

pub fn text(row: &SqliteRow, column: &str) -> Result<String, StoreError> {
    row.try_get(column)
        .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
}

pub fn optional_text(row: &SqliteRow, column: &str) -> Result<Option<String>, StoreError> {
    row.try_get(column)
        .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
}

pub fn integer(row: &SqliteRow, column: &str) -> Result<i64, StoreError> {
    row.try_get(column)
        .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
}

/// Non-negative integer that fits in a u32
pub fn count(row: &SqliteRow, column: &str) -> Result<u32, StoreError> {
    let value = integer(row, column)?;
    u32::try_from(value).map_err(|_| StoreError::corrupt(format!("{}: {} out of range", column, value)))
}

/// Parse an identifier stored as text
pub fn id<T>(row: &SqliteRow, column: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = text(row, column)?;
    raw.parse()
        .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
}

pub fn optional_id<T>(row: &SqliteRow, column: &str) -> Result<Option<T>, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_text(row, column)?
        .map(|raw| {
            raw.parse()
                .map_err(|e| StoreError::corrupt(format!("{}: {}", column, e)))
        })
        .transpose()
}

/// Decode an integer code through the enum's own decoder
pub fn code<T>(
    row: &SqliteRow,
    column: &str,
    decode: impl Fn(i64) -> Option<T>,
) -> Result<T, StoreError> {
    let value = integer(row, column)?;
    decode(value).ok_or_else(|| StoreError::corrupt(format!("{}: unknown code {}", column, value)))
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

pub fn unit_type(row: &SqliteRow, column: &str) -> Result<UnitType, StoreError> {
    let raw = text(row, column)?;
    decode_unit_type(column, &raw)
}

pub fn optional_unit_type(row: &SqliteRow, column: &str) -> Result<Option<UnitType>, StoreError> {
    optional_text(row, column)?
        .map(|raw| decode_unit_type(column, &raw))
        .transpose()
}

fn decode_unit_type(column: &str, raw: &str) -> Result<UnitType, StoreError> {
    single_char(raw)
        .and_then(UnitType::from_code)
        .ok_or_else(|| StoreError::corrupt(format!("{}: unknown unit type {:?}", column, raw)))
}

pub fn order_code(row: &SqliteRow, column: &str) -> Result<OrderCode, StoreError> {
    let raw = text(row, column)?;
    decode_order_code(column, &raw)
}

pub fn optional_order_code(row: &SqliteRow, column: &str) -> Result<Option<OrderCode>, StoreError> {
    optional_text(row, column)?
        .map(|raw| decode_order_code(column, &raw))
        .transpose()
}

fn decode_order_code(column: &str, raw: &str) -> Result<OrderCode, StoreError> {
    single_char(raw)
        .and_then(OrderCode::from_code)
        .ok_or_else(|| StoreError::corrupt(format!("{}: unknown order code {:?}", column, raw)))
}

/// Text form of a unit type for binding
pub fn unit_code(unit_type: UnitType) -> String {
    unit_type.code().to_string()
}

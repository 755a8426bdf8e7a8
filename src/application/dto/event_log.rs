use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::EventFilter;
use crate::domain::entities::{Event, EventKind, EventPayload};
use crate::domain::value_objects::{CountryId, GameId, Phase, Season};

/// Query parameters for the admin event list.
///
/// Season and phase are given by number, kind by its stored name.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQueryDto {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub season: Option<i64>,
    #[serde(default)]
    pub phase: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub message: Option<u8>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListEventsQueryDto {
    /// Validate the query into a store filter
    pub fn into_filter(self, game_id: GameId) -> Result<EventFilter, String> {
        let mut filter = EventFilter::for_game(game_id);

        // Message codes overlap between kinds
        if self.message.is_some() && self.kind.is_none() {
            return Err("Filtering by message requires an event kind".to_string());
        }

        if let Some(kind) = self.kind {
            filter.kind =
                Some(EventKind::parse(&kind).ok_or_else(|| format!("Unknown event kind: {}", kind))?);
        }
        if let Some(season) = self.season {
            filter.season =
                Some(Season::from_number(season).ok_or_else(|| format!("Invalid season: {}", season))?);
        }
        if let Some(phase) = self.phase {
            filter.phase =
                Some(Phase::from_number(phase).ok_or_else(|| format!("Invalid phase: {}", phase))?);
        }
        if let Some(country) = self.country {
            filter.country = Some(
                country
                    .parse::<CountryId>()
                    .map_err(|_| "Invalid country ID".to_string())?,
            );
        }
        filter.year = self.year;
        filter.message = self.message;
        filter.limit = self.limit;

        Ok(filter)
    }
}

/// Query parameters for the rendered player log.
#[derive(Debug, Default, Deserialize)]
pub struct EventLogQueryDto {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One row of the admin event list.
#[derive(Debug, Clone, Serialize)]
pub struct EventRowDto {
    pub id: i64,
    pub game_id: String,
    pub year: u32,
    pub season: u8,
    pub phase: u8,
    pub kind: EventKind,
    pub country: Option<String>,
    pub message: Option<u8>,
    /// Rendered log sentence
    pub text: String,
    pub details: EventPayload,
}

impl EventRowDto {
    pub fn new(event: Event, text: String) -> Self {
        Self {
            id: event.id.value(),
            game_id: event.game_id.to_string(),
            year: event.year,
            season: event.season.number(),
            phase: event.phase.number(),
            kind: event.kind(),
            country: event.payload.country().map(|c| c.to_string()),
            message: event.payload.message_code(),
            text,
            details: event.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_filter() {
        let game_id = GameId::new();
        let query = ListEventsQueryDto {
            kind: Some("unit_condition".to_string()),
            season: Some(3),
            phase: Some(2),
            message: Some(4),
            ..Default::default()
        };

        let filter = query.into_filter(game_id).unwrap();
        assert_eq!(filter.game_id, game_id);
        assert_eq!(filter.kind, Some(EventKind::UnitCondition));
        assert_eq!(filter.season, Some(Season::Fall));
        assert_eq!(filter.phase, Some(Phase::Orders));
        assert_eq!(filter.message, Some(4));
    }

    #[test]
    fn test_invalid_query_values_are_rejected() {
        let game_id = GameId::new();
        let bad_kind = ListEventsQueryDto {
            kind: Some("OrderEvent".to_string()),
            ..Default::default()
        };
        assert!(bad_kind.into_filter(game_id).is_err());

        let bad_season = ListEventsQueryDto {
            season: Some(0),
            ..Default::default()
        };
        assert!(bad_season.into_filter(game_id).is_err());

        let bad_country = ListEventsQueryDto {
            country: Some("milan".to_string()),
            ..Default::default()
        };
        assert!(bad_country.into_filter(game_id).is_err());
    }

    #[test]
    fn test_message_without_kind_is_rejected() {
        let game_id = GameId::new();
        let query = ListEventsQueryDto {
            message: Some(0),
            ..Default::default()
        };
        let err = query.into_filter(game_id).unwrap_err();
        assert!(err.contains("requires an event kind"));
    }
}

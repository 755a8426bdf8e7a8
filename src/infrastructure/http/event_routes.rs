//! Event log API routes
//!
//! Read-only views of a game's event log: the raw rows for admins and the
//! rendered lines shown to players.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{EventLogQueryDto, EventRowDto, ListEventsQueryDto};
use crate::application::services::{EventLogService, DEFAULT_LOG_LIMIT};
use crate::domain::services::RenderedEvent;
use crate::domain::value_objects::GameId;
use crate::infrastructure::state::AppState;

/// Upper bound for the `limit` parameter of both views
const MAX_LIMIT: u32 = 500;

fn parse_game_id(raw: &str) -> Result<GameId, (StatusCode, String)> {
    raw.parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid game ID".to_string()))
}

/// List stored events of a game, newest first
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Query(query): Query<ListEventsQueryDto>,
) -> Result<Json<Vec<EventRowDto>>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let mut filter = query
        .into_filter(game_id)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    filter.limit = filter.limit.map(|limit| limit.min(MAX_LIMIT));

    let rows = state
        .event_log_service
        .list_events(&filter)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(rows))
}

/// Rendered log lines of a game, newest first
pub async fn event_log(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Query(query): Query<EventLogQueryDto>,
) -> Result<Json<Vec<RenderedEvent>>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT).min(MAX_LIMIT);

    let lines = state
        .event_log_service
        .rendered_log(game_id, limit)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{GameRepositoryPort, ScenarioRepositoryPort};
    use crate::domain::entities::{Area, Country, Game};
    use crate::domain::events::{GameFact, UnitFact};
    use crate::domain::value_objects::{Phase, Season, UnitType};
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::http::create_routes;
    use crate::infrastructure::persistence::SqliteRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use tower::ServiceExt;

    async fn app() -> (Router, Arc<AppState>) {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            server_port: 0,
            event_retention_days: 30,
            sweep_interval_secs: 86400,
        };
        let repository = SqliteRepository::in_memory().await.unwrap();
        let state = Arc::new(AppState::with_repository(config, repository));
        (create_routes().with_state(state.clone()), state)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    /// A game with one new Venetian fleet logged
    async fn seeded_game(state: &AppState) -> Game {
        let venice = Area::new("VEN", "Venice");
        let republic = Country::new("Venice", "venice");
        let scenarios = state.repository.scenarios();
        scenarios.save_area(&venice).await.unwrap();
        scenarios.save_country(&republic).await.unwrap();

        let game = Game::new(1454, Season::Spring, Phase::Adjustments);
        state.repository.games().save(&game).await.unwrap();

        let id = state
            .event_logger
            .record(
                &game,
                GameFact::UnitPlaced(UnitFact {
                    country: Some(republic.id),
                    unit_type: UnitType::Fleet,
                    area: venice.id,
                }),
            )
            .await;
        assert!(id.is_some());
        game
    }

    #[tokio::test]
    async fn test_log_renders_recorded_fact() {
        let (router, state) = app().await;
        let game = seeded_game(&state).await;

        let (status, body) = get(router, &format!("/api/games/{}/log", game.id)).await;
        assert_eq!(status, StatusCode::OK);

        let lines: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(lines[0]["text"], "New Fleet in Venice.");
        assert_eq!(lines[0]["season_class"], "season_1");
        assert_eq!(lines[0]["event_class"], "new-unit-event");
        assert_eq!(lines[0]["country_class"], "venice");
    }

    #[tokio::test]
    async fn test_list_events_with_filters() {
        let (router, state) = app().await;
        let game = seeded_game(&state).await;

        let (status, body) = get(
            router.clone(),
            &format!("/api/games/{}/events?kind=new_unit&season=1", game.id),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rows: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.as_array().map(|r| r.len()), Some(1));
        assert_eq!(rows[0]["kind"], "new_unit");
        assert_eq!(rows[0]["year"], 1454);
        assert_eq!(rows[0]["text"], "New Fleet in Venice.");
        assert_eq!(rows[0]["details"]["unit_type"], "fleet");

        let (status, body) = get(router, &format!("/api/games/{}/events?kind=income", game.id)).await;
        assert_eq!(status, StatusCode::OK);
        let rows: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.as_array().map(|r| r.len()), Some(0));
    }

    #[tokio::test]
    async fn test_bad_parameters_are_rejected() {
        let (router, state) = app().await;
        let game = seeded_game(&state).await;

        let (status, _) = get(router.clone(), "/api/games/not-a-game/log").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(
            router.clone(),
            &format!("/api/games/{}/events?kind=NewUnitEvent", game.id),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&body).contains("Unknown event kind"));

        let (status, _) = get(router.clone(), &format!("/api/games/{}/events?phase=9", game.id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(router, &format!("/api/games/{}/events?message=0", game.id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&body).contains("requires an event kind"));
    }
}

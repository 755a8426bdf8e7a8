//! HTTP REST API routes

mod event_routes;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use event_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Event log routes
        .route("/api/games/{game_id}/events", get(event_routes::list_events))
        .route("/api/games/{game_id}/log", get(event_routes::event_log))
}

async fn health_check() -> &'static str {
    "OK"
}

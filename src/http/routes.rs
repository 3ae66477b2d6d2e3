//! HTTP route definitions

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app::AppState;
use crate::util::time::uptime_secs;
use crate::ws::handler::ws_handler;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Browser clients connect from file:// pages and arbitrary LAN hosts
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(info_handler))
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn info_handler(State(state): State<AppState>) -> String {
    format!(
        "Tank game relay server\n\nWebSocket endpoint: ws://{}/ws\nHealth: /health\nPlayers connected: {}\n",
        state.config.server_addr,
        state.connections.count()
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    players: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        players: state.connections.count(),
    })
}

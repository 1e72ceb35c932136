//! HTTP/WebSocket API for the game server.
//!
//! # Architecture
//!
//! - **Axum**: async web framework for HTTP/WebSocket
//! - **Actor model**: room state lives in dedicated actor tasks; handlers
//!   only pass messages
//!
//! # Endpoints
//!
//! - `GET  /health` - Server health status
//! - `GET  /api/rooms` - List live rooms
//! - `POST /api/rooms` - Mint a fresh room code
//! - `GET  /ws/{room_id}?name=<name>` - Join a room over WebSocket
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod rate_limiter;
pub mod rooms;
pub mod websocket;

use axum::{
    Router,
    response::Json,
    routing::get,
};
use serde_json::json;
use spot_rush::RoomManager;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket
/// connections. Cloned per request; cheap thanks to the Arc.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomManager>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/rooms",
            get(rooms::list_rooms).post(rooms::create_room),
        )
        .route("/ws/{room_id}", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Server health status.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

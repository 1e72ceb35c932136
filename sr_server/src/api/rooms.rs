//! Room discovery and creation endpoints.

use axum::{Json, extract::State};
use serde::Serialize;
use spot_rush::{RoomId, RoomMetadata};

use super::AppState;
use crate::metrics;

/// List every live room.
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomMetadata>> {
    let rooms = state.rooms.list().await;
    metrics::active_rooms(rooms.len());
    Json(rooms)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoom {
    pub room_id: RoomId,
}

/// Mint a fresh room code. The room itself materializes when its first
/// player connects, so an unused code costs nothing.
pub async fn create_room(State(state): State<AppState>) -> Json<CreatedRoom> {
    let mut room_id = RoomId::generate();
    while state.rooms.get(&room_id).await.is_some() {
        room_id = RoomId::generate();
    }
    Json(CreatedRoom { room_id })
}

//! Room registry: spawns and tracks room actors.
//!
//! This is the explicit per-process owner of room lifecycles. A room is
//! created on first join to its id, lives while it has players, and is
//! dropped from the registry after its actor shuts down.

use log::info;
use std::collections::HashMap;
use tokio::sync::{RwLock, oneshot};

use super::{
    actor::{RoomActor, RoomHandle},
    messages::{RoomMessage, RoomMetadata},
};
use crate::game::{entities::RoomId, session::GameSettings};

/// Registry of live room actors sharing one settings template.
pub struct RoomManager {
    settings: GameSettings,
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
}

impl RoomManager {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Handle for the given room, spawning its actor if the room doesn't
    /// exist yet (or its previous actor already shut down).
    pub async fn get_or_create(&self, room_id: RoomId) -> RoomHandle {
        let mut rooms = self.rooms.write().await;

        if let Some(handle) = rooms.get(&room_id)
            && !handle.is_closed()
        {
            return handle.clone();
        }

        let (actor, handle) = RoomActor::new(room_id.clone(), self.settings.clone());
        rooms.insert(room_id, handle.clone());
        tokio::spawn(actor.run());
        info!("spawned room {}", handle.room_id());
        handle
    }

    /// Handle for an existing live room.
    pub async fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).filter(|h| !h.is_closed()).cloned()
    }

    /// Count of rooms whose actor is still running.
    pub async fn active_room_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.values().filter(|h| !h.is_closed()).count()
    }

    /// Summaries of every live room, for discovery.
    pub async fn list(&self) -> Vec<RoomMetadata> {
        self.evict_closed().await;

        let handles: Vec<RoomHandle> = {
            let rooms = self.rooms.read().await;
            rooms.values().cloned().collect()
        };

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            let (tx, rx) = oneshot::channel();
            if handle.send(RoomMessage::GetState { response: tx }).await.is_err() {
                continue;
            }
            if let Ok(view) = rx.await {
                out.push(RoomMetadata {
                    room_id: view.room_id,
                    player_count: view.players.len(),
                    max_players: self.settings.max_players,
                    status: view.status,
                });
            }
        }
        out
    }

    /// Drop registry entries whose actors have shut down.
    pub async fn evict_closed(&self) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, handle| !handle.is_closed());
    }
}

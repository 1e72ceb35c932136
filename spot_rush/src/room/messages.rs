//! Room actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::game::{
    entities::{CardId, Player, PlayerId, PlayerName, RoomId},
    events::ServerEvent,
    session::{GameStateView, SessionError, Status},
};

/// Messages that can be sent to a [`crate::room::RoomActor`].
///
/// Join carries a response channel because the caller needs the outcome.
/// Start, guess, and leave are fire-and-forget: their results surface as
/// events, or not at all (silent-ignore policies).
#[derive(Debug)]
pub enum RoomMessage {
    /// Seat a player and subscribe their event channel.
    Join {
        name: PlayerName,
        subscriber: mpsc::Sender<ServerEvent>,
        response: oneshot::Sender<Result<Player, SessionError>>,
    },

    /// Start (or restart) the round. No-op unless the sender is host.
    Start { player_id: PlayerId },

    /// Judge a guess against the current grid.
    Guess {
        player_id: PlayerId,
        card_ids: Vec<CardId>,
    },

    /// Remove a player and their subscription.
    Leave { player_id: PlayerId },

    /// Fetch the current snapshot.
    GetState {
        response: oneshot::Sender<GameStateView>,
    },
}

/// Room summary for discovery endpoints.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetadata {
    pub room_id: RoomId,
    pub player_count: usize,
    pub max_players: usize,
    pub status: Status,
}

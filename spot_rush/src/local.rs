//! Client-local simulation adapter.
//!
//! Runs one room entirely in process, for solo play or a frontend demo mode.
//! Every call returns the deliveries the networked server would have made,
//! so a UI can feed them through the exact pipeline it uses for live events.

use log::error;

use crate::game::{
    entities::{CardId, Player, PlayerId, PlayerName, RoomId},
    events::{self, Outgoing},
    session::{GameSettings, GameStateView, Session, SessionError},
};

/// Room id used by every local game.
const LOCAL_ROOM_ID: &str = "LOCAL";

/// A single in-process room over the shared [`Session`] engine.
pub struct LocalGame {
    session: Session,
}

impl LocalGame {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            session: Session::new(RoomId::new(LOCAL_ROOM_ID), settings),
        }
    }

    /// Seat a player. Returns the new player (or the rejection) plus the
    /// deliveries owed to the room.
    pub fn join(&mut self, name: &str) -> (Result<Player, SessionError>, Vec<Outgoing>) {
        match self.session.join(PlayerName::new(name)) {
            Ok(player) => {
                let outgoing = events::after_join(&self.session, &player);
                (Ok(player), outgoing)
            }
            Err(err) => (Err(err), Vec::new()),
        }
    }

    /// Start or restart the round. Host-only; anyone else produces no
    /// deliveries.
    pub fn start(&mut self, player_id: PlayerId) -> Vec<Outgoing> {
        match self.session.start(player_id) {
            Ok(outcome) => events::after_start(&self.session, &outcome),
            Err(err) => {
                error!("deck generation failed: {err}");
                Vec::new()
            }
        }
    }

    /// Judge a guess and return the deliveries it produced.
    pub fn guess(&mut self, player_id: PlayerId, card_ids: &[CardId]) -> Vec<Outgoing> {
        let outcome = self.session.guess(player_id, card_ids);
        events::after_guess(&self.session, player_id, &outcome)
    }

    /// Remove a player, promoting a new host if needed.
    pub fn leave(&mut self, player_id: PlayerId) -> Vec<Outgoing> {
        match self.session.leave(player_id) {
            Some(_) => events::after_leave(&self.session),
            None => Vec::new(),
        }
    }

    /// Current snapshot, same shape the server broadcasts.
    #[must_use]
    pub fn state(&self) -> GameStateView {
        self.session.snapshot()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

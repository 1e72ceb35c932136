//! Room actor implementation with async message handling.

use log::{debug, error, info};
use std::collections::HashMap;
use tokio::sync::mpsc;

use super::messages::RoomMessage;
use crate::game::{
    entities::{PlayerId, RoomId},
    events::{self, Outgoing, Recipient, ServerEvent},
    session::{GameSettings, Session},
};

/// Mailbox depth per room. Guesses are tiny; a room that outruns this is a
/// misbehaving client and backpressure is the right answer.
const MAILBOX_CAPACITY: usize = 100;

/// Room actor handle for sending messages.
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    room_id: RoomId,
}

impl RoomHandle {
    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Send a message to the room.
    pub async fn send(&self, message: RoomMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .await
            .map_err(|_| "room is closed".to_string())
    }

    /// Whether the actor behind this handle has shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Room actor owning a single session.
///
/// The mailbox is the mutual-exclusion boundary required by the game rules:
/// each inbound action runs to completion before the next is processed, so
/// two guesses claiming the same card can never both be accepted.
pub struct RoomActor {
    /// Session state owned exclusively by this actor.
    session: Session,

    /// Message inbox.
    inbox: mpsc::Receiver<RoomMessage>,

    /// Event channels of connected players.
    subscribers: HashMap<PlayerId, mpsc::Sender<ServerEvent>>,
}

impl RoomActor {
    /// Create a new room actor and the handle for talking to it.
    pub fn new(room_id: RoomId, settings: GameSettings) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(MAILBOX_CAPACITY);
        let handle = RoomHandle {
            sender,
            room_id: room_id.clone(),
        };
        let actor = Self {
            session: Session::new(room_id, settings),
            inbox,
            subscribers: HashMap::new(),
        };
        (actor, handle)
    }

    /// Run the room event loop until the last player leaves.
    pub async fn run(mut self) {
        info!("room {} open", self.session.room_id());

        while let Some(message) = self.inbox.recv().await {
            if self.handle_message(message).await {
                break;
            }
        }

        info!("room {} closed", self.session.room_id());
    }

    /// Handle one message. Returns `true` once the room should shut down.
    async fn handle_message(&mut self, message: RoomMessage) -> bool {
        match message {
            RoomMessage::Join {
                name,
                subscriber,
                response,
            } => {
                match self.session.join(name) {
                    Ok(player) => {
                        info!("{} joined room {}", player.name, self.session.room_id());
                        self.subscribers.insert(player.id, subscriber);
                        let outgoing = events::after_join(&self.session, &player);
                        let _ = response.send(Ok(player));
                        self.dispatch(outgoing).await;
                    }
                    Err(err) => {
                        let _ = response.send(Err(err));
                    }
                }
                false
            }

            RoomMessage::Start { player_id } => {
                match self.session.start(player_id) {
                    Ok(outcome) => {
                        self.dispatch(events::after_start(&self.session, &outcome))
                            .await;
                    }
                    Err(err) => {
                        // Unreachable for validated settings.
                        error!(
                            "room {}: deck generation failed: {err}",
                            self.session.room_id()
                        );
                    }
                }
                false
            }

            RoomMessage::Guess {
                player_id,
                card_ids,
            } => {
                let outcome = self.session.guess(player_id, &card_ids);
                self.dispatch(events::after_guess(&self.session, player_id, &outcome))
                    .await;
                false
            }

            RoomMessage::Leave { player_id } => {
                self.subscribers.remove(&player_id);
                if let Some(player) = self.session.leave(player_id) {
                    info!("{} left room {}", player.name, self.session.room_id());
                    self.dispatch(events::after_leave(&self.session)).await;
                }
                self.session.players().is_empty()
            }

            RoomMessage::GetState { response } => {
                let _ = response.send(self.session.snapshot());
                false
            }
        }
    }

    /// Deliver pending events, pruning subscribers whose channel has died.
    async fn dispatch(&mut self, outgoing: Vec<Outgoing>) {
        for Outgoing { to, event } in outgoing {
            match to {
                Recipient::Room => {
                    let mut dead = Vec::new();
                    for (player_id, subscriber) in &self.subscribers {
                        if subscriber.send(event.clone()).await.is_err() {
                            dead.push(*player_id);
                        }
                    }
                    for player_id in dead {
                        debug!("dropping dead subscriber {player_id}");
                        self.subscribers.remove(&player_id);
                    }
                }
                Recipient::Player(player_id) => {
                    let failed = match self.subscribers.get(&player_id) {
                        Some(subscriber) => subscriber.send(event).await.is_err(),
                        None => false,
                    };
                    if failed {
                        debug!("dropping dead subscriber {player_id}");
                        self.subscribers.remove(&player_id);
                    }
                }
            }
        }
    }
}

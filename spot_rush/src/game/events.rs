//! The event contract shared by the local and networked adapters.
//!
//! Sessions return plain outcomes; the builders here turn an outcome into
//! the deliveries the transport owes the room. Keeping this in one place is
//! what lets the server actor and [`crate::local::LocalGame`] stay thin
//! shells over the same engine.

use serde::Serialize;

use super::{
    entities::{CardId, Player, PlayerId},
    session::{GameStateView, GuessOutcome, Session, SessionError, StartOutcome},
};

/// Wire events delivered to clients. Serialized as a tagged JSON object,
/// e.g. `{"type":"wrongGuess","playerId":"..."}`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Tells a fresh joiner who they are in this room. Without it a raw
    /// WebSocket client has no way to find itself in the player list.
    Joined { player: Player },
    /// Full session snapshot, broadcast after every accepted mutation.
    GameState(GameStateView),
    /// A match was accepted; lets clients animate the claimed cards.
    CorrectGuess {
        player_id: PlayerId,
        card_ids: Vec<CardId>,
    },
    /// Transient notification to the guesser alone.
    WrongGuess { player_id: PlayerId },
    /// A rejected action, delivered to the single requester.
    Error { message: String },
}

/// Who an event is owed to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recipient {
    /// Every member of the room.
    Room,
    /// One member only.
    Player(PlayerId),
}

/// One pending delivery.
#[derive(Clone, Debug)]
pub struct Outgoing {
    pub to: Recipient,
    pub event: ServerEvent,
}

impl Outgoing {
    #[must_use]
    pub fn broadcast(event: ServerEvent) -> Self {
        Self {
            to: Recipient::Room,
            event,
        }
    }

    #[must_use]
    pub fn to_player(player_id: PlayerId, event: ServerEvent) -> Self {
        Self {
            to: Recipient::Player(player_id),
            event,
        }
    }
}

/// Deliveries owed after an accepted join: the new player learns who they
/// are, then everyone sees the grown lobby.
#[must_use]
pub fn after_join(session: &Session, player: &Player) -> Vec<Outgoing> {
    vec![
        Outgoing::to_player(
            player.id,
            ServerEvent::Joined {
                player: player.clone(),
            },
        ),
        Outgoing::broadcast(ServerEvent::GameState(session.snapshot())),
    ]
}

/// The error event owed to a rejected joiner.
#[must_use]
pub fn join_rejected(error: &SessionError) -> ServerEvent {
    ServerEvent::Error {
        message: error.to_string(),
    }
}

/// Deliveries owed after a start request.
#[must_use]
pub fn after_start(session: &Session, outcome: &StartOutcome) -> Vec<Outgoing> {
    match outcome {
        StartOutcome::Started => vec![Outgoing::broadcast(ServerEvent::GameState(
            session.snapshot(),
        ))],
        StartOutcome::NotHost => Vec::new(),
    }
}

/// Deliveries owed after a guess: nothing for ignored input, a private nudge
/// for a wrong guess, and a room-wide claim plus snapshot for a match.
#[must_use]
pub fn after_guess(session: &Session, player_id: PlayerId, outcome: &GuessOutcome) -> Vec<Outgoing> {
    match outcome {
        GuessOutcome::Ignored => Vec::new(),
        GuessOutcome::Wrong => vec![Outgoing::to_player(
            player_id,
            ServerEvent::WrongGuess { player_id },
        )],
        GuessOutcome::Matched { card_ids, .. } => vec![
            Outgoing::broadcast(ServerEvent::CorrectGuess {
                player_id,
                card_ids: card_ids.clone(),
            }),
            Outgoing::broadcast(ServerEvent::GameState(session.snapshot())),
        ],
    }
}

/// Deliveries owed after a departure. An emptied room has nobody left to
/// tell.
#[must_use]
pub fn after_leave(session: &Session) -> Vec<Outgoing> {
    if session.players().is_empty() {
        Vec::new()
    } else {
        vec![Outgoing::broadcast(ServerEvent::GameState(
            session.snapshot(),
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        entities::{PlayerName, RoomId},
        session::GameSettings,
    };
    use uuid::Uuid;

    fn lobby_session() -> (Session, PlayerId) {
        let mut session = Session::new(RoomId::new("TEST"), GameSettings::default());
        let host = session.join(PlayerName::new("ana")).unwrap();
        (session, host.id)
    }

    #[test]
    fn test_wrong_guess_goes_to_the_guesser_only() {
        let (session, guesser) = lobby_session();
        let outgoing = after_guess(&session, guesser, &GuessOutcome::Wrong);

        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].to, Recipient::Player(guesser));
        assert!(matches!(outgoing[0].event, ServerEvent::WrongGuess { .. }));
    }

    #[test]
    fn test_ignored_guess_emits_nothing() {
        let (session, guesser) = lobby_session();
        assert!(after_guess(&session, guesser, &GuessOutcome::Ignored).is_empty());
    }

    #[test]
    fn test_match_emits_claim_then_snapshot() {
        let (session, guesser) = lobby_session();
        let outcome = GuessOutcome::Matched {
            symbol: crate::game::entities::Symbol::new("🍎"),
            card_ids: vec![4, 7, 9],
            finished: false,
        };
        let outgoing = after_guess(&session, guesser, &outcome);

        assert_eq!(outgoing.len(), 2);
        assert_eq!(outgoing[0].to, Recipient::Room);
        assert!(matches!(
            &outgoing[0].event,
            ServerEvent::CorrectGuess { card_ids, .. } if *card_ids == vec![4, 7, 9]
        ));
        assert_eq!(outgoing[1].to, Recipient::Room);
        assert!(matches!(outgoing[1].event, ServerEvent::GameState(_)));
    }

    #[test]
    fn test_non_host_start_emits_nothing() {
        let (session, _) = lobby_session();
        assert!(after_start(&session, &StartOutcome::NotHost).is_empty());
    }

    #[test]
    fn test_join_notifies_the_joiner_then_the_room() {
        let mut session = Session::new(RoomId::new("TEST"), GameSettings::default());
        let player = session.join(PlayerName::new("ana")).unwrap();

        let outgoing = after_join(&session, &player);
        assert_eq!(outgoing.len(), 2);
        assert_eq!(outgoing[0].to, Recipient::Player(player.id));
        assert!(matches!(
            &outgoing[0].event,
            ServerEvent::Joined { player: p } if p.id == player.id
        ));
        assert_eq!(outgoing[1].to, Recipient::Room);
        assert!(matches!(outgoing[1].event, ServerEvent::GameState(_)));
    }

    #[test]
    fn test_event_wire_format() {
        let player_id = Uuid::new_v4();
        let event = ServerEvent::WrongGuess { player_id };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], serde_json::json!("wrongGuess"));
        assert_eq!(json["playerId"], serde_json::json!(player_id.to_string()));

        let event = ServerEvent::CorrectGuess {
            player_id,
            card_ids: vec![2, 5, 7],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], serde_json::json!("correctGuess"));
        assert_eq!(json["cardIds"], serde_json::json!([2, 5, 7]));

        let (session, _) = lobby_session();
        let json = serde_json::to_value(ServerEvent::GameState(session.snapshot())).unwrap();
        assert_eq!(json["type"], serde_json::json!("gameState"));
        assert_eq!(json["status"], serde_json::json!("LOBBY"));
        assert_eq!(json["deckSize"], serde_json::json!(0));
    }

    #[test]
    fn test_join_rejected_message() {
        let event = join_rejected(&SessionError::RoomFull);
        let ServerEvent::Error { message } = event else {
            panic!("expected an error event");
        };
        assert_eq!(message, "room is full");
    }
}

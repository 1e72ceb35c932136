//! # Spot Rush
//!
//! A real-time, multi-player symbol-matching card game engine.
//!
//! The deck is a projective-plane incidence structure: for a prime order `N`
//! it holds `N² + N + 1` cards of `N + 1` symbols each, and any two cards
//! share exactly one symbol. Players race to pick three cards from a shared
//! grid that all carry one common symbol; matched cards are replaced in place
//! until the deck runs dry and a winner is declared.
//!
//! ## Architecture
//!
//! All game rules live in one side-effect-free [`Session`] state machine with
//! three statuses:
//!
//! - **Lobby**: waiting for players to join
//! - **Playing**: grid live, guesses accepted
//! - **Finished**: deck exhausted, winner declared
//!
//! Two adapters consume it:
//!
//! - [`room`]: an actor per room plus a registry, for the networked server.
//!   The actor mailbox serializes all mutations of a room, so concurrent
//!   guesses can never both claim the same card.
//! - [`local`]: a synchronous in-process adapter for client-local play.
//!
//! Both emit the same [`ServerEvent`] stream, built once in [`game::events`].
//!
//! ## Example
//!
//! ```
//! use spot_rush::{GameSettings, LocalGame};
//!
//! let mut game = LocalGame::new(GameSettings::default());
//! let (player, _events) = game.join("ana");
//! let host = player.unwrap();
//! game.start(host.id);
//! assert_eq!(game.state().grid.len(), 9);
//! ```

/// Core game logic: entities, deck generation, matching, grid, and the
/// session state machine.
pub mod game;

/// Client-local simulation adapter.
pub mod local;

/// Room actors and the room registry for the networked server.
pub mod room;

pub use game::{
    constants,
    entities::{
        self, Card, CardId, Deck, DeckError, Player, PlayerId, PlayerName, RoomId, Score, Symbol,
        SymbolAlphabet,
    },
    events::{Outgoing, Recipient, ServerEvent},
    grid::Grid,
    matching,
    session::{
        GameSettings, GameStateView, GuessOutcome, Session, SessionError, SettingsError,
        StartOutcome, Status,
    },
};
pub use local::LocalGame;
pub use room::{
    RoomActor, RoomHandle, RoomManager,
    messages::{RoomMessage, RoomMetadata},
};

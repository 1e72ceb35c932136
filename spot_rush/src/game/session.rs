//! The per-room session state machine.
//!
//! A [`Session`] owns everything one room needs: its players, the undrawn
//! deck, the visible grid, and the status. It is purely synchronous and
//! side-effect-free; adapters (the room actor, the local simulation) own the
//! mutual-exclusion boundary and the event delivery.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{
    constants,
    entities::{
        Card, CardId, Deck, DeckError, Player, PlayerId, PlayerName, RoomId, Score, Symbol,
        SymbolAlphabet,
    },
    grid::Grid,
    matching,
};

/// Game configuration settings.
#[derive(Clone, Debug)]
pub struct GameSettings {
    /// Order of the projective plane the deck is built from. Must be prime.
    pub order: usize,
    /// Symbol alphabet; needs at least `order² + order + 1` entries.
    pub alphabet: SymbolAlphabet,
    /// Number of cards dealt into the play area.
    pub grid_capacity: usize,
    /// Join limit per room.
    pub max_players: usize,
    /// Points per accepted match.
    pub match_reward: Score,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            order: constants::DEFAULT_ORDER,
            alphabet: constants::EMOJI_SYMBOLS,
            grid_capacity: constants::DEFAULT_GRID_CAPACITY,
            max_players: constants::DEFAULT_MAX_PLAYERS,
            match_reward: constants::DEFAULT_MATCH_REWARD,
        }
    }
}

impl GameSettings {
    /// Reject configurations that could not run a game: a deck that cannot
    /// be generated, a grid too small to hold a match, or a room nobody can
    /// enter.
    pub fn validate(&self) -> Result<(), SettingsError> {
        Deck::check_preconditions(self.order, self.alphabet)?;
        if self.grid_capacity < constants::MATCH_SIZE {
            return Err(SettingsError::GridTooSmall {
                capacity: self.grid_capacity,
                match_size: constants::MATCH_SIZE,
            });
        }
        if self.max_players == 0 {
            return Err(SettingsError::NoPlayers);
        }
        Ok(())
    }
}

/// Errors from settings validation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SettingsError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("grid capacity {capacity} cannot seat a {match_size}-card match")]
    GridTooSmall { capacity: usize, match_size: usize },
    #[error("need room for at least one player")]
    NoPlayers,
}

/// Room status. No sub-states.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Lobby,
    Playing,
    Finished,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::Playing => "playing",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// User-visible join failures. Everything else the session shrugs off
/// silently by policy.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("room is full")]
    RoomFull,
    #[error("game already in progress")]
    GameInProgress,
}

/// Result of a start request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StartOutcome {
    Started,
    /// Non-host start attempts are ignored without an error surfacing.
    NotHost,
}

/// Result of a guess.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GuessOutcome {
    /// Not playing, unknown player, or the ids didn't resolve to exactly
    /// three grid cards. A client racing a just-replaced card lands here,
    /// so no penalty fires.
    Ignored,
    /// Three grid cards without a unique common symbol. State untouched.
    Wrong,
    /// A valid match: score awarded, slots replaced in place.
    Matched {
        symbol: Symbol,
        card_ids: Vec<CardId>,
        finished: bool,
    },
}

/// The snapshot broadcast to every room member after an accepted mutation.
/// The undrawn deck never leaves the session; clients only learn its size.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub room_id: RoomId,
    pub players: Vec<Player>,
    pub status: Status,
    pub grid: Vec<Card>,
    pub deck_size: usize,
    pub last_match: Option<Symbol>,
    pub winner: Option<Player>,
}

/// One room's complete game state and the transition rules over it.
#[derive(Debug)]
pub struct Session {
    room_id: RoomId,
    settings: GameSettings,
    players: Vec<Player>,
    status: Status,
    grid: Grid,
    deck: Deck,
    last_match: Option<Symbol>,
    winner: Option<Player>,
}

impl Session {
    #[must_use]
    pub fn new(room_id: RoomId, settings: GameSettings) -> Self {
        Self {
            room_id,
            settings,
            players: Vec::new(),
            status: Status::Lobby,
            grid: Grid::default(),
            deck: Deck::default(),
            last_match: None,
            winner: None,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    #[must_use]
    pub fn is_host(&self, player_id: PlayerId) -> bool {
        self.players
            .iter()
            .any(|p| p.id == player_id && p.is_host)
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    /// Seat a new player. The first joiner becomes host. Rejected while a
    /// round is live; a finished room still accepts joiners, who are seated
    /// for the next restart.
    pub fn join(&mut self, name: PlayerName) -> Result<Player, SessionError> {
        if self.status == Status::Playing {
            return Err(SessionError::GameInProgress);
        }
        if self.players.len() >= self.settings.max_players {
            return Err(SessionError::RoomFull);
        }
        let player = Player::new(name, self.players.is_empty());
        self.players.push(player.clone());
        Ok(player)
    }

    /// Start (or restart) a round: fresh deck, zeroed scores, full grid.
    /// Host-only; anyone else is ignored.
    pub fn start(&mut self, player_id: PlayerId) -> Result<StartOutcome, DeckError> {
        if !self.is_host(player_id) {
            debug!("ignoring start from non-host in room {}", self.room_id);
            return Ok(StartOutcome::NotHost);
        }

        self.deck = Deck::generate(self.settings.order, self.settings.alphabet)?;
        for player in &mut self.players {
            player.score = 0;
        }
        self.grid.clear();
        self.last_match = None;
        self.winner = None;
        self.status = Status::Playing;
        self.grid.fill(&mut self.deck, self.settings.grid_capacity);
        Ok(StartOutcome::Started)
    }

    /// Judge a guess against the current grid.
    pub fn guess(&mut self, player_id: PlayerId, card_ids: &[CardId]) -> GuessOutcome {
        if self.status != Status::Playing || self.player(player_id).is_none() {
            return GuessOutcome::Ignored;
        }

        let slots = self.grid.resolve(card_ids);
        if slots.len() != constants::MATCH_SIZE {
            return GuessOutcome::Ignored;
        }

        let picked: Vec<&Card> = slots.iter().filter_map(|&slot| self.grid.get(slot)).collect();
        let Some(symbol) = matching::find_common_symbol(&picked) else {
            return GuessOutcome::Wrong;
        };
        let matched_ids: Vec<CardId> = picked.iter().map(|card| card.id).collect();

        let reward = self.settings.match_reward;
        if let Some(player) = self.player_mut(player_id) {
            player.score += reward;
        }
        self.last_match = Some(symbol);
        self.grid.replace(&slots, &mut self.deck);
        let finished = self.check_finished();

        GuessOutcome::Matched {
            symbol,
            card_ids: matched_ids,
            finished,
        }
    }

    /// Remove a departing player. If the host left and anyone remains, the
    /// earliest-joined player inherits the role.
    pub fn leave(&mut self, player_id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == player_id)?;
        let removed = self.players.remove(idx);
        if removed.is_host
            && let Some(next) = self.players.first_mut()
        {
            next.is_host = true;
        }
        Some(removed)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameStateView {
        GameStateView {
            room_id: self.room_id.clone(),
            players: self.players.clone(),
            status: self.status,
            grid: self.grid.cards().to_vec(),
            deck_size: self.deck.len(),
            last_match: self.last_match,
            winner: self.winner.clone(),
        }
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// The round ends once the grid can no longer hold a match and nothing
    /// is left to draw.
    fn check_finished(&mut self) -> bool {
        if self.grid.len() < constants::MATCH_SIZE && self.deck.is_empty() {
            self.status = Status::Finished;
            self.winner = self.leading_player().cloned();
            true
        } else {
            false
        }
    }

    /// Highest score wins; ties go to the earlier joiner.
    fn leading_player(&self) -> Option<&Player> {
        self.players
            .iter()
            .fold(None, |best: Option<&Player>, player| match best {
                Some(leader) if player.score <= leader.score => Some(leader),
                _ => Some(player),
            })
    }
}

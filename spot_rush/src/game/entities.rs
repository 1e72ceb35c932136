use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::VecDeque, fmt};
use thiserror::Error;
use uuid::Uuid;

use super::constants;

/// An opaque symbol token. The engine only ever compares symbols; what the
/// token looks like is the renderer's business.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Symbol(&'static str);

impl Symbol {
    #[must_use]
    pub const fn new(token: &'static str) -> Self {
        Self(token)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An ordered alphabet of distinct symbol tokens. Must hold at least
/// `N² + N + 1` entries for an order-`N` deck.
pub type SymbolAlphabet = &'static [&'static str];

/// Card ids are unique within one deck generation and stable for the card's
/// lifetime.
pub type CardId = u32;

/// A playing card: a fixed set of `order + 1` distinct symbols plus a
/// cosmetic rotation the game logic never reads.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub symbols: Vec<Symbol>,
    pub rotation: f32,
}

impl Card {
    #[must_use]
    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// Errors from deck generation. Both conditions would silently break the
/// one-shared-symbol guarantee if let through, so they are rejected up front.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DeckError {
    #[error("order {order} needs an alphabet of {required} symbols but only {actual} are available")]
    AlphabetTooSmall {
        order: usize,
        required: usize,
        actual: usize,
    },
    #[error("order {0} is not prime")]
    OrderNotPrime(usize),
}

/// The undrawn remainder of one deck generation. Shrinks monotonically via
/// [`Deck::draw`]; never regrows except by full regeneration at game start.
#[derive(Debug, Default)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Build and shuffle a full deck for one game instance.
    ///
    /// The construction is a projective plane of prime order `N`: one card
    /// for the line at infinity, `N` cards through point 0, and `N × N`
    /// affine lines. Every pair of distinct cards shares exactly one symbol
    /// index, and the alphabet-size precondition keeps the index-to-symbol
    /// mapping injective so the guarantee survives the mapping.
    pub fn generate(order: usize, alphabet: SymbolAlphabet) -> Result<Self, DeckError> {
        Self::check_preconditions(order, alphabet)?;

        let n = order;
        let mut layouts: Vec<Vec<usize>> = Vec::with_capacity(n * n + n + 1);

        // Line at infinity plus point 0.
        layouts.push((0..=n).collect());

        // N cards through point 0.
        for j in 0..n {
            let mut indices = vec![0];
            for k in 0..n {
                indices.push(n + 1 + n * j + k);
            }
            layouts.push(indices);
        }

        // N x N affine lines: slope i, intercept j.
        for i in 0..n {
            for j in 0..n {
                let mut indices = vec![i + 1];
                for k in 0..n {
                    indices.push(n + 1 + n * k + (i * k + j) % n);
                }
                layouts.push(indices);
            }
        }

        let mut rng = rand::rng();
        let mut cards: Vec<Card> = layouts
            .into_iter()
            .enumerate()
            .map(|(id, indices)| Card {
                id: id as CardId,
                symbols: indices.into_iter().map(|i| Symbol(alphabet[i])).collect(),
                rotation: rng.random_range(0.0..360.0),
            })
            .collect();
        cards.shuffle(&mut rng);

        Ok(Self {
            cards: cards.into(),
        })
    }

    /// Validate the generation preconditions without building anything.
    pub fn check_preconditions(order: usize, alphabet: SymbolAlphabet) -> Result<(), DeckError> {
        if !is_prime(order) {
            return Err(DeckError::OrderNotPrime(order));
        }
        let required = order * order + order + 1;
        if alphabet.len() < required {
            return Err(DeckError::AlphabetTooSmall {
                order,
                required,
                actual: alphabet.len(),
            });
        }
        Ok(())
    }

    /// Pop up to `count` cards from the front of the deck. Drawing from a
    /// short deck returns the cards that are left, not an error.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
impl Deck {
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Per-game score in points.
pub type Score = u32;

/// Unique player identifier, minted on join.
pub type PlayerId = Uuid;

/// A display name, normalized on the way in.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        let mut name: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        name.truncate(constants::MAX_NAME_LENGTH);
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A short room code. Uppercased and stripped of whitespace so that codes
/// typed by hand on a phone still land in the same room.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(s: &str) -> Self {
        let mut id: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        id.truncate(constants::MAX_ROOM_ID_LENGTH);
        Self(id)
    }

    /// Mint a fresh random room code.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code: String = (0..constants::ROOM_CODE_LENGTH)
            .map(|_| {
                let chars = constants::ROOM_CODE_CHARS;
                chars[rng.random_range(0..chars.len())] as char
            })
            .collect();
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A participant in one room. Exactly one player per room holds
/// `is_host = true`; the first joiner gets it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub score: Score,
    pub is_host: bool,
    pub avatar: Symbol,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName, is_host: bool) -> Self {
        let mut rng = rand::rng();
        let avatar = constants::AVATARS
            .choose(&mut rng)
            .copied()
            .unwrap_or(constants::DEFAULT_AVATAR);
        Self {
            id: Uuid::new_v4(),
            name,
            score: 0,
            is_host,
            avatar: Symbol::new(avatar),
        }
    }
}

//! The round grid: the fixed-capacity play area participants pick from.

use super::entities::{Card, CardId, Deck};

/// An ordered sequence of card slots. Replacement writes new cards into the
/// matched cards' slot indices so uninvolved cards never move; only when the
/// deck cannot refill a slot is that slot removed and the grid shrinks.
#[derive(Debug, Default)]
pub struct Grid {
    slots: Vec<Card>,
}

impl Grid {
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Card> {
        self.slots.get(slot)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Draw up to `count` cards and append them to the grid. Returns how many
    /// were actually drawn.
    pub fn fill(&mut self, deck: &mut Deck, count: usize) -> usize {
        let drawn = deck.draw(count);
        let appended = drawn.len();
        self.slots.extend(drawn);
        appended
    }

    /// Slot indices (ascending) of grid members whose id appears in `ids`.
    #[must_use]
    pub fn resolve(&self, ids: &[CardId]) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, card)| ids.contains(&card.id))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Replace the cards at `slot_indices` (ascending, from [`Grid::resolve`])
    /// with freshly drawn ones, preserving slot positions. Slots the deck can
    /// no longer refill are removed outright. Returns the drawn card ids.
    pub fn replace(&mut self, slot_indices: &[usize], deck: &mut Deck) -> Vec<CardId> {
        let mut drawn = deck.draw(slot_indices.len()).into_iter();
        let mut drawn_ids = Vec::with_capacity(slot_indices.len());
        let mut unfilled = Vec::new();

        for &slot in slot_indices {
            match drawn.next() {
                Some(card) => {
                    drawn_ids.push(card.id);
                    self.slots[slot] = card;
                }
                None => unfilled.push(slot),
            }
        }

        // Highest index first so earlier removals don't shift later ones.
        for slot in unfilled.into_iter().rev() {
            self.slots.remove(slot);
        }

        drawn_ids
    }
}

#[cfg(test)]
impl Grid {
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { slots: cards }
    }
}

//! Three-card match validation.

use super::constants::MATCH_SIZE;
use super::entities::{Card, Symbol};

/// Return the one symbol all three cards share, if there is exactly one.
///
/// Anything other than three cards is "no match" rather than an error, and
/// an intersection of two or more symbols is also rejected. That second case
/// cannot happen for cards drawn from one valid generation, but stale or
/// hand-crafted input still has to land somewhere sane.
pub fn find_common_symbol(cards: &[&Card]) -> Option<Symbol> {
    if cards.len() != MATCH_SIZE {
        return None;
    }

    let mut common: Vec<Symbol> = cards[0].symbols.clone();
    for card in &cards[1..] {
        common.retain(|s| card.has_symbol(*s));
    }

    match common.as_slice() {
        [symbol] => Some(*symbol),
        _ => None,
    }
}

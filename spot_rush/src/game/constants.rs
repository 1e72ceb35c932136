//! Reference configuration for the game.

/// Order of the projective plane. 7 gives 8 symbols per card and a 57-card
/// deck. Must be prime for the construction to hold.
pub const DEFAULT_ORDER: usize = 7;

/// Number of cards kept visible in the play area.
pub const DEFAULT_GRID_CAPACITY: usize = 9;

/// Maximum players per room.
pub const DEFAULT_MAX_PLAYERS: usize = 8;

/// Points awarded per accepted match.
pub const DEFAULT_MATCH_REWARD: u32 = 3;

/// A match is always exactly three cards.
pub const MATCH_SIZE: usize = 3;

/// Display names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 16;

/// Room ids are truncated to this many characters.
pub const MAX_ROOM_ID_LENGTH: usize = 12;

/// Length of generated room codes.
pub const ROOM_CODE_LENGTH: usize = 6;

/// Room code charset. Skips 0/O/1/I/L lookalikes so codes survive being
/// read aloud.
pub const ROOM_CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Avatar tokens handed out on join.
pub const AVATARS: &[&str] = &["🦊", "🐼", "🐸", "🐙", "🦉", "🐯", "🐰", "🦁"];

/// Fallback avatar.
pub const DEFAULT_AVATAR: &str = "👤";

/// The reference symbol alphabet: 58 tokens, one more than the 57 indices an
/// order-7 deck consumes.
pub const EMOJI_SYMBOLS: &[&str] = &[
    "🍎", "🍌", "🍒", "🍇", "🍉", "🍓", "🍑", "🍍", //
    "🥝", "🥥", "🥑", "🍆", "🥔", "🥕", "🌽", "🌶️", //
    "🥒", "🥦", "🍄", "🥜", "🥐", "🥖", "🥨", "🥞", //
    "🧀", "🍖", "🍗", "🥩", "🥓", "🍔", "🍟", "🍕", //
    "🌭", "🥪", "🌮", "🌯", "🍳", "🥘", "🍲", "🥣", //
    "🥗", "🍿", "🧂", "🥫", "🍱", "🍘", "🍙", "🍚", //
    "🍛", "🍜", "🍝", "🍠", "🍢", "🍣", "🍤", "🍥", //
    "🍦", "🍧",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_covers_default_order() {
        let required = DEFAULT_ORDER * DEFAULT_ORDER + DEFAULT_ORDER + 1;
        assert!(EMOJI_SYMBOLS.len() >= required);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = EMOJI_SYMBOLS.iter().collect();
        assert_eq!(unique.len(), EMOJI_SYMBOLS.len());
    }

    #[test]
    fn test_grid_can_seat_a_match() {
        assert!(DEFAULT_GRID_CAPACITY >= MATCH_SIZE);
    }
}

//! Room actors and the room registry.
//!
//! Each room is one actor task owning its [`crate::Session`]; every mutation
//! flows through the actor's mailbox, so within a room nothing ever
//! interleaves. Two guesses racing for the same card resolve in mailbox
//! order and the loser is silently ignored, exactly as a stale guess is.

pub mod actor;
pub mod manager;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use manager::RoomManager;

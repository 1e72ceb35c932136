//! Symbol-matching game engine - core entities and session logic.
//!
//! This module provides the foundational game implementation including:
//! - Deck generation from a projective-plane incidence structure
//! - Three-card match validation
//! - The round grid with position-preserving replacement
//! - The session state machine (lobby, playing, finished)
//! - The event contract shared by the local and networked adapters

pub mod constants;
pub mod entities;
pub mod events;
pub mod grid;
pub mod matching;
pub mod session;

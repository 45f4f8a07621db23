//! This is the core module. It exports the value types
//! that are agnostic to the poker variant being played.

/// card.rs has rank and suit.
mod card;
/// Re-export Card, Rank, and Suit
pub use self::card::{Card, Rank, Suit};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// The error type shared by every parser in the crate.
mod error;
pub use self::error::PokerError;

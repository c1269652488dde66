//! Cards, hands and the sources they are dealt from.
//!
//! - `Card`: immutable (suit, rank) pair
//! - `Hand`: ordered cards with the ace-aware total
//! - `CardSource`: the dealing boundary the environment depends on
//! - `Deck` / `StackedDeck`: the standard deck and a fixed-order stack

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, Rank, Suit};
pub use deck::{CardSource, Deck, StackedDeck, DECK_SIZE};
pub use hand::{Hand, SCENARIO_TOTALS};

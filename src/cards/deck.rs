//! Card sources: the 52-card deck and a fixed-order stack.
//!
//! The environment only talks to the `CardSource` trait, so a multi-deck
//! shoe or a rigged sequence can replace the standard deck without the
//! agent noticing.

use super::card::{Card, Rank, Suit};
use crate::core::{Error, GameRng, Result};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Anything the environment can deal from.
pub trait CardSource {
    /// Restore the source to its full, unshuffled contents.
    fn populate(&mut self);

    /// Permute the undealt cards.
    fn shuffle(&mut self, rng: &mut GameRng);

    /// Remove and return the next card.
    ///
    /// Fails with [`Error::ExhaustedDeck`] when nothing is left.
    fn draw(&mut self) -> Result<Card>;

    /// Cards left to draw.
    fn remaining(&self) -> usize;
}

/// A single 52-card deck with a draw cursor.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Create a populated, unshuffled deck.
    pub fn new() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            next: 0,
        };
        deck.populate();
        deck
    }

    /// The undealt cards, next card first.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.next..]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSource for Deck {
    fn populate(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(suit, rank));
            }
        }
        self.next = 0;
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards[self.next..]);
    }

    fn draw(&mut self) -> Result<Card> {
        let card = self.cards.get(self.next).copied().ok_or(Error::ExhaustedDeck)?;
        self.next += 1;
        Ok(card)
    }

    fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

/// Deals a caller-chosen sequence in order; shuffling does nothing.
///
/// Gives scenario runs and tests full control over which cards arrive.
#[derive(Clone, Debug, Default)]
pub struct StackedDeck {
    order: Vec<Card>,
    next: usize,
}

impl StackedDeck {
    /// Create a stack that deals `order` front to back.
    pub fn new(order: Vec<Card>) -> Self {
        Self { order, next: 0 }
    }

    /// Create a stack from ranks alone; suits are filled in arbitrarily.
    pub fn from_ranks(ranks: &[Rank]) -> Self {
        Self::new(ranks.iter().map(|&r| Card::new(Suit::Spades, r)).collect())
    }
}

impl CardSource for StackedDeck {
    fn populate(&mut self) {
        self.next = 0;
    }

    fn shuffle(&mut self, _rng: &mut GameRng) {}

    fn draw(&mut self) -> Result<Card> {
        let card = self.order.get(self.next).copied().ok_or(Error::ExhaustedDeck)?;
        self.next += 1;
        Ok(card)
    }

    fn remaining(&self) -> usize {
        self.order.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_populate_has_every_card_once() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), DECK_SIZE);

        let unique: HashSet<_> = deck.undealt().iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_base_order() {
        let mut deck = Deck::new();
        assert_eq!(deck.draw().unwrap(), Card::new(Suit::Hearts, Rank::Two));
        assert_eq!(deck.undealt().last(), Some(&Card::new(Suit::Spades, Rank::Ace)));
    }

    #[test]
    fn test_draw_until_exhausted() {
        let mut deck = Deck::new();
        for _ in 0..DECK_SIZE {
            deck.draw().unwrap();
        }
        assert_eq!(deck.remaining(), 0);
        assert!(matches!(deck.draw(), Err(Error::ExhaustedDeck)));
    }

    #[test]
    fn test_populate_resets_cursor() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(1);
        deck.shuffle(&mut rng);
        for _ in 0..10 {
            deck.draw().unwrap();
        }

        deck.populate();
        assert_eq!(deck.remaining(), DECK_SIZE);
        assert_eq!(deck.undealt(), Deck::new().undealt());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(&mut GameRng::new(42));
        b.shuffle(&mut GameRng::new(42));
        assert_eq!(a.undealt(), b.undealt());

        let mut c = Deck::new();
        c.shuffle(&mut GameRng::new(43));
        assert_ne!(a.undealt(), c.undealt());
    }

    #[test]
    fn test_shuffle_only_touches_undealt() {
        let mut deck = Deck::new();
        let first = deck.draw().unwrap();
        deck.shuffle(&mut GameRng::new(5));

        assert_eq!(deck.remaining(), DECK_SIZE - 1);
        assert!(!deck.undealt().contains(&first));
    }

    #[test]
    fn test_stacked_deck_order() {
        let mut stack = StackedDeck::from_ranks(&[Rank::Ten, Rank::Ace]);
        stack.shuffle(&mut GameRng::new(0));

        assert_eq!(stack.draw().unwrap().rank, Rank::Ten);
        assert_eq!(stack.draw().unwrap().rank, Rank::Ace);
        assert!(matches!(stack.draw(), Err(Error::ExhaustedDeck)));

        stack.populate();
        assert_eq!(stack.remaining(), 2);
    }
}

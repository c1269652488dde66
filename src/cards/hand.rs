//! Hands and the ace-aware total.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank, Suit};
use crate::core::{Error, Result};

/// Totals a hand can be synthesized to for a scenario start.
pub const SCENARIO_TOTALS: std::ops::RangeInclusive<u8> = 2..=21;

/// An ordered hand of cards. Only ever grows by appending.
///
/// Hands rarely exceed six cards, so they stay inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; 8]>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand of ace-free cards summing to `total`.
    ///
    /// Used to start an episode from a fixed total without drawing.
    /// Every card is worth 2..=10, so totals from 2 to 21 are reachable.
    pub fn from_total(total: u8) -> Result<Self> {
        if !SCENARIO_TOTALS.contains(&total) {
            return Err(Error::InvalidScenario { total });
        }

        let mut hand = Hand::new();
        let mut remaining = total;
        while remaining > 10 {
            // Leave at least 2 so the final card is a real rank.
            let take = (remaining - 2).min(10);
            hand.push(synthetic(take));
            remaining -= take;
        }
        hand.push(synthetic(remaining));
        Ok(hand)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains_ace(&self) -> bool {
        self.cards.iter().any(|c| c.rank.is_ace())
    }

    /// Best total: every ace starts at 11 and is demoted to 1, one at a
    /// time, while the hand is over 21.
    pub fn total(&self) -> u8 {
        self.score().0
    }

    /// True while at least one ace is still counted as 11 in [`Hand::total`].
    pub fn has_usable_ace(&self) -> bool {
        self.score().1 > 0
    }

    /// Returns the total and how many aces remain counted high.
    fn score(&self) -> (u8, u8) {
        let mut soft_aces: u8 = 0;
        let mut total: u8 = 0;
        for card in &self.cards {
            if card.rank.is_ace() {
                soft_aces += 1;
            }
            total = total.saturating_add(card.value());
        }
        while total > 21 && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        (total, soft_aces)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        write!(f, " ({})", self.total())
    }
}

fn synthetic(value: u8) -> Card {
    // Callers only pass 2..=10.
    let rank = Rank::from_value(value).unwrap_or(Rank::Ten);
    Card::new(Suit::Hearts, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(ranks: &[Rank]) -> Hand {
        ranks.iter().map(|&r| Card::new(Suit::Clubs, r)).collect()
    }

    #[test]
    fn test_two_aces_and_nine() {
        let h = hand(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(h.total(), 21);
        assert!(h.has_usable_ace());
    }

    #[test]
    fn test_soft_seventeen() {
        let h = hand(&[Rank::Ace, Rank::Six]);
        assert_eq!(h.total(), 17);
        assert!(h.has_usable_ace());
    }

    #[test]
    fn test_ace_forced_low() {
        let h = hand(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(h.total(), 16);
        assert!(!h.has_usable_ace());
        assert!(h.contains_ace());
    }

    #[test]
    fn test_face_cards() {
        let h = hand(&[Rank::King, Rank::Queen]);
        assert_eq!(h.total(), 20);
        assert!(!h.has_usable_ace());

        let bust = hand(&[Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(bust.total(), 22);
    }

    #[test]
    fn test_four_aces() {
        let h = hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]);
        assert_eq!(h.total(), 14);
        assert!(h.has_usable_ace());
    }

    #[test]
    fn test_empty_hand() {
        let h = Hand::new();
        assert_eq!(h.total(), 0);
        assert!(!h.has_usable_ace());
        assert!(h.is_empty());
    }

    #[test]
    fn test_from_total_covers_range() {
        for total in SCENARIO_TOTALS {
            let h = Hand::from_total(total).unwrap();
            assert_eq!(h.total(), total, "hand {h}");
            assert!(!h.contains_ace());
        }
    }

    #[test]
    fn test_from_total_shapes() {
        assert_eq!(Hand::from_total(6).unwrap().len(), 1);
        let twenty = Hand::from_total(20).unwrap();
        assert_eq!(twenty.cards()[0].rank, Rank::Ten);
        assert_eq!(twenty.len(), 2);
    }

    #[test]
    fn test_from_total_rejects_out_of_range() {
        assert!(matches!(Hand::from_total(1), Err(Error::InvalidScenario { total: 1 })));
        assert!(matches!(Hand::from_total(22), Err(Error::InvalidScenario { total: 22 })));
    }

    #[test]
    fn test_display() {
        let h = hand(&[Rank::Ace, Rank::King]);
        assert_eq!(h.to_string(), "A♣ K♣ (21)");
    }
}

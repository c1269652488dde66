//! Blackjack environment: one player against the dealer.
//!
//! The environment owns the card source and both hands for the length of
//! an episode. Status is recomputed from the hands on every `percept()`
//! call, so the state machine has no stored status to drift out of sync.

use tracing::trace;

use super::percept::{Action, GameStatus, Percept};
use crate::cards::{CardSource, Deck, Hand};
use crate::core::{GameRng, Result};

/// Default total the dealer stands on.
pub const DEALER_STAND: u8 = 17;

/// Single-player Blackjack with two actions.
#[derive(Clone, Debug)]
pub struct BlackjackEnv<S: CardSource = Deck> {
    source: S,
    player: Hand,
    dealer: Hand,
    last_action: Option<Action>,
    dealer_stand: u8,
}

impl BlackjackEnv<Deck> {
    /// Create an environment dealing from a standard deck.
    pub fn new() -> Self {
        Self::with_source(Deck::new())
    }
}

impl Default for BlackjackEnv<Deck> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CardSource> BlackjackEnv<S> {
    /// Create an environment dealing from `source`.
    ///
    /// Hands start empty; call [`reset`](Self::reset) before playing.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            player: Hand::new(),
            dealer: Hand::new(),
            last_action: None,
            dealer_stand: DEALER_STAND,
        }
    }

    /// Set the total the dealer stands on.
    #[must_use]
    pub fn with_dealer_stand(mut self, total: u8) -> Self {
        self.dealer_stand = total;
        self
    }

    /// Start a new episode: fresh shuffled cards, two to the player, one
    /// face-up card to the dealer.
    pub fn reset(&mut self, rng: &mut GameRng) -> Result<()> {
        self.refill(rng);
        self.player = Hand::new();
        self.dealer = Hand::new();
        self.player.push(self.source.draw()?);
        self.player.push(self.source.draw()?);
        self.dealer.push(self.source.draw()?);
        trace!(player = %self.player, dealer = %self.dealer, "dealt");
        Ok(())
    }

    /// Start a new episode from fixed totals instead of a deal.
    ///
    /// Both hands are synthesized from ace-free cards that are not taken
    /// from the deck. The deck is still refilled and shuffled, and later
    /// draws come from it.
    pub fn reset_to_totals(&mut self, player_total: u8, dealer_total: u8, rng: &mut GameRng) -> Result<()> {
        let player = Hand::from_total(player_total)?;
        let dealer = Hand::from_total(dealer_total)?;
        self.refill(rng);
        self.player = player;
        self.dealer = dealer;
        Ok(())
    }

    fn refill(&mut self, rng: &mut GameRng) {
        self.source.populate();
        self.source.shuffle(rng);
        self.last_action = None;
    }

    /// Observe the current state.
    pub fn percept(&self) -> Percept {
        Percept::new(
            self.player.total(),
            self.player.has_usable_ace(),
            self.dealer.total(),
            self.status(),
        )
    }

    /// Evaluate the game status from the current hands.
    pub fn status(&self) -> GameStatus {
        let player = self.player.total();
        let dealer = self.dealer.total();

        if player == 21 || dealer > 21 {
            GameStatus::Win
        } else if player > 21 {
            GameStatus::Lose
        } else if self.last_action == Some(Action::Hold) {
            if player > dealer {
                GameStatus::Win
            } else if player == dealer && dealer != 21 {
                GameStatus::Tie
            } else {
                GameStatus::Lose
            }
        } else {
            GameStatus::Continue
        }
    }

    /// Apply the agent's action.
    ///
    /// `Hit` draws one player card; a bust is reported by the next percept
    /// and the dealer does not play. `Hold` plays out the dealer hand.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Hit => {
                self.player.push(self.source.draw()?);
            }
            Action::Hold => {
                while self.dealer.total() < self.dealer_stand {
                    self.dealer.push(self.source.draw()?);
                }
            }
        }
        self.last_action = Some(action);
        trace!(%action, player = %self.player, dealer = %self.dealer, "applied");
        Ok(())
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn dealer_stand(&self) -> u8 {
        self.dealer_stand
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

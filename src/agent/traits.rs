//! The interface the training driver plays agents through.

use crate::core::GameRng;
use crate::env::{Action, Percept};

/// A Blackjack player driven one percept at a time.
///
/// ## Implementation Notes
///
/// - `decide_action` is called once per environment step and must return
///   `None` exactly when the percept is terminal
/// - Any randomness must come from the `rng` argument so episodes replay
///   deterministically
/// - `reset_episode_state` is called once before the first percept of every
///   episode
pub trait Agent {
    /// Consume a percept and choose the next action.
    fn decide_action(&mut self, percept: &Percept, rng: &mut GameRng) -> Option<Action>;

    /// Forget anything carried over from the previous episode.
    fn reset_episode_state(&mut self);
}

impl<A: Agent + ?Sized> Agent for &mut A {
    fn decide_action(&mut self, percept: &Percept, rng: &mut GameRng) -> Option<Action> {
        (**self).decide_action(percept, rng)
    }

    fn reset_episode_state(&mut self) {
        (**self).reset_episode_state();
    }
}

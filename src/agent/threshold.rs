//! Fixed-threshold baseline agent.

use super::traits::Agent;
use crate::core::GameRng;
use crate::env::{Action, Percept};

/// Default total the baseline keeps hitting up to.
pub const DEFAULT_HIT_THRESHOLD: u8 = 18;

/// Hits while the player total is at or below a threshold, then holds.
///
/// Learns nothing; useful as a reference win rate for the learned agent.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdAgent {
    hit_threshold: u8,
}

impl ThresholdAgent {
    pub fn new(hit_threshold: u8) -> Self {
        Self { hit_threshold }
    }

    pub fn hit_threshold(&self) -> u8 {
        self.hit_threshold
    }
}

impl Default for ThresholdAgent {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_THRESHOLD)
    }
}

impl Agent for ThresholdAgent {
    fn decide_action(&mut self, percept: &Percept, _rng: &mut GameRng) -> Option<Action> {
        if percept.is_terminal() {
            None
        } else if percept.player_total <= self.hit_threshold {
            Some(Action::Hit)
        } else {
            Some(Action::Hold)
        }
    }

    fn reset_episode_state(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GameStatus;

    #[test]
    fn test_threshold_decisions() {
        let mut agent = ThresholdAgent::default();
        let mut rng = GameRng::new(0);

        let hit = Percept::new(18, false, 10, GameStatus::Continue);
        let hold = Percept::new(19, false, 10, GameStatus::Continue);
        let over = Percept::new(14, false, 10, GameStatus::Lose);

        assert_eq!(agent.decide_action(&hit, &mut rng), Some(Action::Hit));
        assert_eq!(agent.decide_action(&hold, &mut rng), Some(Action::Hold));
        assert_eq!(agent.decide_action(&over, &mut rng), None);
    }

    #[test]
    fn test_custom_threshold() {
        let mut agent = ThresholdAgent::new(11);
        let mut rng = GameRng::new(0);
        assert_eq!(agent.hit_threshold(), 11);
        assert_eq!(
            agent.decide_action(&Percept::new(12, true, 3, GameStatus::Continue), &mut rng),
            Some(Action::Hold)
        );
    }
}

//! Episode outcomes and aggregate win statistics.

use serde::{Deserialize, Serialize};

use crate::env::GameStatus;

/// Result of one finished episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Status of the final percept.
    pub status: GameStatus,

    /// Reward of the final percept: -1, 0 or +1.
    pub reward: i8,

    /// Actions applied before the agent stopped.
    pub steps: usize,
}

impl EpisodeOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.status == GameStatus::Win
    }
}

/// Win/loss/tie counts over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: u64,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
}

impl TrainingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished episode.
    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        match outcome.status {
            GameStatus::Win => self.wins += 1,
            GameStatus::Lose => self.losses += 1,
            GameStatus::Tie => self.ties += 1,
            // Only reachable if an agent stops early; counted as played.
            GameStatus::Continue => {}
        }
    }

    /// Fold another run's counts into this one.
    pub fn merge(&mut self, other: &TrainingSummary) {
        self.episodes += other.episodes;
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
    }

    /// Wins divided by episodes played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.episodes as f64
        }
    }
}

impl std::fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} episodes: {} wins, {} losses, {} ties (win rate {:.4})",
            self.episodes,
            self.wins,
            self.losses,
            self.ties,
            self.win_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: GameStatus) -> EpisodeOutcome {
        EpisodeOutcome {
            status,
            reward: status.reward(),
            steps: 1,
        }
    }

    #[test]
    fn test_record_and_rate() {
        let mut summary = TrainingSummary::new();
        assert_eq!(summary.win_rate(), 0.0);

        summary.record(&outcome(GameStatus::Win));
        summary.record(&outcome(GameStatus::Lose));
        summary.record(&outcome(GameStatus::Tie));
        summary.record(&outcome(GameStatus::Win));

        assert_eq!(summary.episodes, 4);
        assert_eq!((summary.wins, summary.losses, summary.ties), (2, 1, 1));
        assert_eq!(summary.win_rate(), 0.5);
    }

    #[test]
    fn test_merge() {
        let mut a = TrainingSummary {
            episodes: 10,
            wins: 4,
            losses: 5,
            ties: 1,
        };
        let b = TrainingSummary {
            episodes: 10,
            wins: 6,
            losses: 3,
            ties: 1,
        };
        a.merge(&b);

        assert_eq!(a.episodes, 20);
        assert_eq!(a.win_rate(), 0.5);
    }

    #[test]
    fn test_display() {
        let summary = TrainingSummary {
            episodes: 8,
            wins: 3,
            losses: 4,
            ties: 1,
        };
        assert_eq!(
            summary.to_string(),
            "8 episodes: 3 wins, 4 losses, 1 ties (win rate 0.3750)"
        );
    }
}

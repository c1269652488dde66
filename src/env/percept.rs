//! What the environment shows the agent each step.

use serde::{Deserialize, Serialize};

/// Player action. `None` from an agent means "episode over".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Hold,
}

impl Action {
    /// Both actions, in the order ties are resolved.
    pub const ALL: [Action; 2] = [Action::Hit, Action::Hold];

    /// The action not taken.
    #[must_use]
    pub const fn other(self) -> Action {
        match self {
            Action::Hit => Action::Hold,
            Action::Hold => Action::Hit,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hit => f.write_str("hit"),
            Action::Hold => f.write_str("hold"),
        }
    }
}

/// Game status after the most recent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Continue,
    Win,
    Lose,
    Tie,
}

impl GameStatus {
    /// Everything but `Continue` ends the episode.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Continue)
    }

    /// Reward paid on reaching this status.
    #[must_use]
    pub const fn reward(self) -> i8 {
        match self {
            GameStatus::Win => 1,
            GameStatus::Continue | GameStatus::Tie => 0,
            GameStatus::Lose => -1,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::Continue => "continue",
            GameStatus::Win => "win",
            GameStatus::Lose => "lose",
            GameStatus::Tie => "tie",
        };
        f.write_str(s)
    }
}

/// The observable part of a percept: what the value table is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub player_total: u8,
    pub usable_ace: bool,
    pub dealer_total: u8,
}

impl StateKey {
    #[must_use]
    pub const fn new(player_total: u8, usable_ace: bool, dealer_total: u8) -> Self {
        Self {
            player_total,
            usable_ace,
            dealer_total,
        }
    }
}

/// Snapshot emitted once per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    /// Player total, aces counted optimally.
    pub player_total: u8,
    /// At least one player ace is still counted as 11.
    pub usable_ace: bool,
    /// Dealer total, same ace rule.
    pub dealer_total: u8,
    pub status: GameStatus,
    /// One of -1, 0, +1.
    pub reward: i8,
}

impl Percept {
    /// Build a percept; the reward follows from the status.
    #[must_use]
    pub const fn new(player_total: u8, usable_ace: bool, dealer_total: u8, status: GameStatus) -> Self {
        Self {
            player_total,
            usable_ace,
            dealer_total,
            status,
            reward: status.reward(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> StateKey {
        StateKey::new(self.player_total, self.usable_ace, self.dealer_total)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl std::fmt::Display for Percept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "player {}{} vs dealer {} -> {} ({:+})",
            self.player_total,
            if self.usable_ace { " (soft)" } else { "" },
            self.dealer_total,
            self.status,
            self.reward
        )
    }
}

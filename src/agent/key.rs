//! State-action keys and the table domain.

use serde::{Deserialize, Serialize};

use crate::env::{Action, StateKey};

/// Largest player or dealer total the tables cover.
///
/// A non-terminal hand is at most 20 and one card adds at most 11, so
/// 31 bounds every total a percept can carry.
pub const MAX_TOTAL: u8 = 31;

/// Number of keys in a fully populated table (32 × 2 × 32 × 2).
pub const KEY_COUNT: usize = (MAX_TOTAL as usize + 1) * 2 * (MAX_TOTAL as usize + 1) * 2;

/// Lookup key for both the value table and the visit-count table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateActionKey {
    pub player_total: u8,
    pub usable_ace: bool,
    pub dealer_total: u8,
    pub action: Action,
}

impl StateActionKey {
    #[must_use]
    pub const fn new(state: StateKey, action: Action) -> Self {
        Self {
            player_total: state.player_total,
            usable_ace: state.usable_ace,
            dealer_total: state.dealer_total,
            action,
        }
    }

    #[must_use]
    pub const fn state(&self) -> StateKey {
        StateKey::new(self.player_total, self.usable_ace, self.dealer_total)
    }

    /// Both totals fall inside the pre-populated domain.
    #[must_use]
    pub const fn in_domain(&self) -> bool {
        self.player_total <= MAX_TOTAL && self.dealer_total <= MAX_TOTAL
    }

    /// Every key in the domain, in key order.
    pub fn all() -> impl Iterator<Item = StateActionKey> {
        (0..=MAX_TOTAL).flat_map(|player| {
            [false, true].into_iter().flat_map(move |ace| {
                (0..=MAX_TOTAL).flat_map(move |dealer| {
                    Action::ALL
                        .into_iter()
                        .map(move |action| StateActionKey::new(StateKey::new(player, ace, dealer), action))
                })
            })
        })
    }
}

impl std::fmt::Display for StateActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.player_total, self.usable_ace, self.dealer_total, self.action
        )
    }
}

//! Greedy policy chart for a trained agent.
//!
//! Rows are player totals, columns the dealer's up-card (2..=11, with 11
//! for an ace). Hard and soft totals get separate sections. Each cell is
//! the action the agent prefers: `H` for hit, `S` for hold (stand).

use std::ops::RangeInclusive;

use super::q_learning::QLearningAgent;
use crate::env::{Action, StateKey};

/// Dealer up-card totals shown as columns.
pub const DEALER_UP_CARDS: RangeInclusive<u8> = 2..=11;

const HARD_TOTALS: RangeInclusive<u8> = 4..=20;
const SOFT_TOTALS: RangeInclusive<u8> = 12..=20;

/// One row of the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyRow {
    pub player_total: u8,
    pub usable_ace: bool,
    /// Preferred action per dealer up-card, in `DEALER_UP_CARDS` order.
    pub actions: Vec<Action>,
}

/// Preferred action for every non-terminal starting situation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyChart {
    rows: Vec<PolicyRow>,
}

impl PolicyChart {
    /// Build the chart from the agent's current value table.
    pub fn from_agent(agent: &QLearningAgent) -> Self {
        let hard = HARD_TOTALS.map(|total| (total, false));
        let soft = SOFT_TOTALS.map(|total| (total, true));

        let rows = hard
            .chain(soft)
            .map(|(player_total, usable_ace)| PolicyRow {
                player_total,
                usable_ace,
                actions: DEALER_UP_CARDS
                    .map(|dealer| agent.preferred_action(StateKey::new(player_total, usable_ace, dealer)))
                    .collect(),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[PolicyRow] {
        &self.rows
    }

    /// Look up one cell.
    #[must_use]
    pub fn action(&self, player_total: u8, usable_ace: bool, dealer_up: u8) -> Option<Action> {
        let column = usize::from(dealer_up.checked_sub(*DEALER_UP_CARDS.start())?);
        self.rows
            .iter()
            .find(|row| row.player_total == player_total && row.usable_ace == usable_ace)
            .and_then(|row| row.actions.get(column).copied())
    }
}

impl std::fmt::Display for PolicyChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut section = None;
        for row in &self.rows {
            if section != Some(row.usable_ace) {
                if section.is_some() {
                    writeln!(f)?;
                }
                write_header(f, if row.usable_ace { "soft" } else { "hard" })?;
                section = Some(row.usable_ace);
            }
            write!(f, "{:<6}", row.player_total)?;
            for action in &row.actions {
                let cell = match action {
                    Action::Hit => 'H',
                    Action::Hold => 'S',
                };
                write!(f, "{cell:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_header(f: &mut std::fmt::Formatter<'_>, title: &str) -> std::fmt::Result {
    write!(f, "{title:<6}")?;
    for dealer in DEALER_UP_CARDS {
        let label = if dealer == 11 { "A".to_string() } else { dealer.to_string() };
        write!(f, "{label:>3}")?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{QTable, StateActionKey, VisitCounts};

    #[test]
    fn test_fresh_agent_prefers_hit_everywhere() {
        let chart = PolicyChart::from_agent(&QLearningAgent::new());

        assert_eq!(chart.rows().len(), 17 + 9);
        assert!(chart
            .rows()
            .iter()
            .all(|row| row.actions.len() == 10 && row.actions.iter().all(|a| *a == Action::Hit)));
    }

    #[test]
    fn test_chart_reflects_values() {
        let mut values = QTable::new();
        values.set(StateActionKey::new(StateKey::new(17, false, 6), Action::Hold), 0.4);
        let agent = QLearningAgent::new().with_tables(values, VisitCounts::new());

        let chart = PolicyChart::from_agent(&agent);
        assert_eq!(chart.action(17, false, 6), Some(Action::Hold));
        assert_eq!(chart.action(17, false, 7), Some(Action::Hit));
        assert_eq!(chart.action(17, true, 6), Some(Action::Hit));
        assert_eq!(chart.action(3, false, 6), None);
        assert_eq!(chart.action(17, false, 1), None);
    }

    #[test]
    fn test_display_layout() {
        let text = PolicyChart::from_agent(&QLearningAgent::new()).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "hard    2  3  4  5  6  7  8  9 10  A");
        assert_eq!(lines[1], "4       H  H  H  H  H  H  H  H  H  H");
        assert!(lines.contains(&"soft    2  3  4  5  6  7  8  9 10  A"));
    }
}

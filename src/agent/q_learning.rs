//! Tabular Q-learning agent.
//!
//! On every percept the agent first corrects the estimate for the
//! state-action pair it chose last step, then picks its next action:
//!
//! ```text
//! N(s,a) += 1
//! α       = c / (c + N(s,a))
//! Q(s,a) += α · (r + γ · max(Q(s',Hit), Q(s',Hold)) − Q(s,a))
//! ```
//!
//! The learning rate decays hyperbolically with the visit count, so early
//! visits move the estimate a lot and later visits barely at all.
//!
//! Action selection is soft: the primary action is taken with probability
//! `confidence` (0.8 by default) and the other action otherwise. This
//! applies even when both values are equal.

use tracing::{trace, warn};

use super::key::StateActionKey;
use super::store::{TablePaths, TableStore};
use super::table::{QTable, VisitCounts};
use super::traits::Agent;
use crate::core::config::validate_confidence;
use crate::core::{ExplorationMode, GameRng, Result, TrainingConfig};
use crate::env::{Action, Percept, StateKey};

/// Q-learning agent owning its value and visit-count tables.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    values: QTable,
    visits: VisitCounts,
    /// Pair chosen on the previous step of the current episode.
    previous: Option<StateActionKey>,
    learning_rate_constant: f64,
    discount: f64,
    confidence: f64,
    exploration: ExplorationMode,
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::build(&TrainingConfig::default())
    }
}

impl QLearningAgent {
    /// Create an agent with zeroed tables and default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an agent with zeroed tables and the config's hyperparameters.
    ///
    /// Fails if the config does not validate.
    pub fn with_config(config: &TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &TrainingConfig) -> Self {
        Self {
            values: QTable::new(),
            visits: VisitCounts::new(),
            previous: None,
            learning_rate_constant: config.learning_rate_constant,
            discount: config.discount,
            confidence: config.confidence,
            exploration: config.exploration,
        }
    }

    /// Replace both tables, e.g. with ones loaded from disk.
    #[must_use]
    pub fn with_tables(mut self, values: QTable, visits: VisitCounts) -> Self {
        self.values = values;
        self.visits = visits;
        self
    }

    /// Set the primary-action rule.
    #[must_use]
    pub fn with_exploration(mut self, mode: ExplorationMode) -> Self {
        self.exploration = mode;
        self
    }

    /// Set the probability of taking the primary action, within (0.5, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Result<Self> {
        validate_confidence(confidence)?;
        self.confidence = confidence;
        Ok(self)
    }

    /// Learning rate applied on the `visits`-th update of a pair.
    #[must_use]
    pub fn learning_rate(&self, visits: u64) -> f64 {
        self.learning_rate_constant / (self.learning_rate_constant + visits as f64)
    }

    #[must_use]
    pub fn q_value(&self, key: &StateActionKey) -> f64 {
        self.values.get(key)
    }

    #[must_use]
    pub fn visits(&self, key: &StateActionKey) -> u64 {
        self.visits.get(key)
    }

    pub fn values(&self) -> &QTable {
        &self.values
    }

    pub fn visit_counts(&self) -> &VisitCounts {
        &self.visits
    }

    pub fn exploration(&self) -> ExplorationMode {
        self.exploration
    }

    /// The pair awaiting an update, if an episode is in progress.
    pub fn pending(&self) -> Option<StateActionKey> {
        self.previous
    }

    /// The action taken with probability `confidence` in `state`.
    #[must_use]
    pub fn preferred_action(&self, state: StateKey) -> Action {
        let hit = self.values.get(&StateActionKey::new(state, Action::Hit));
        let hold = self.values.get(&StateActionKey::new(state, Action::Hold));

        let prefer_hit = match self.exploration {
            ExplorationMode::Argmax => hit >= hold,
            ExplorationMode::Literal => hit == hold,
        };
        if prefer_hit {
            Action::Hit
        } else {
            Action::Hold
        }
    }

    /// Highest estimated value over both actions in `state`.
    #[must_use]
    pub fn state_value(&self, state: StateKey) -> f64 {
        let hit = self.values.get(&StateActionKey::new(state, Action::Hit));
        let hold = self.values.get(&StateActionKey::new(state, Action::Hold));
        hit.max(hold)
    }

    /// Apply one TD update to `key` given the percept that followed it.
    ///
    /// Pairs outside the table domain are skipped so the tables never grow.
    fn update(&mut self, key: StateActionKey, next: &Percept) {
        let Some(count) = self.visits.get_mut(key) else {
            warn!(%key, "state-action pair outside the table domain, update skipped");
            return;
        };
        *count += 1;
        let visits = *count;
        let alpha = self.learning_rate(visits);

        let target = f64::from(next.reward) + self.discount * self.state_value(next.state());
        let Some(value) = self.values.get_mut(key) else {
            return;
        };
        *value += alpha * (target - *value);
        trace!(%key, alpha, target, value = *value, "td update");
    }

    /// Persist both tables under `name`.
    pub fn save_state(&self, store: &TableStore, name: &str) -> Result<TablePaths> {
        Ok(store.save(name, &self.values, &self.visits)?)
    }

    /// Replace both tables with the pair stored under `name`.
    ///
    /// On error the agent's tables are left untouched.
    pub fn load_state(&mut self, store: &TableStore, name: &str) -> Result<()> {
        let (values, visits) = store.load(name)?;
        self.values = values;
        self.visits = visits;
        self.previous = None;
        Ok(())
    }
}

impl Agent for QLearningAgent {
    fn decide_action(&mut self, percept: &Percept, rng: &mut GameRng) -> Option<Action> {
        if let Some(previous) = self.previous.take() {
            self.update(previous, percept);
        }

        if percept.is_terminal() {
            return None;
        }

        let state = percept.state();
        let primary = self.preferred_action(state);
        let action = if rng.gen_bool(self.confidence) {
            primary
        } else {
            primary.other()
        };
        self.previous = Some(StateActionKey::new(state, action));
        Some(action)
    }

    fn reset_episode_state(&mut self) {
        self.previous = None;
    }
}

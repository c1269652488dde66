//! Training configuration.
//!
//! A `TrainingConfig` can be built in code with the `with_*` methods or
//! loaded from YAML. Every field has a default, so a config file only needs
//! the values it overrides:
//!
//! ```yaml
//! episodes: 40000000
//! table_name: pickle
//! seed: 7
//! exploration: literal
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the agent picks its primary action before the confidence coin flip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationMode {
    /// Primary action is the argmax over Hit and Hold; ties go to Hit.
    #[default]
    Argmax,
    /// Hit is primary only when Q(Hit) equals Q(Hold), otherwise Hold.
    ///
    /// Reproduces the behaviour of the tables trained before the argmax
    /// comparison was fixed.
    Literal,
}

impl std::str::FromStr for ExplorationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argmax" => Ok(Self::Argmax),
            "literal" => Ok(Self::Literal),
            other => Err(format!("unknown exploration mode '{other}' (expected argmax or literal)")),
        }
    }
}

/// Configuration for a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Number of episodes to play.
    pub episodes: u64,

    /// Master seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Identifier the value and visit-count tables are persisted under.
    pub table_name: String,

    /// Directory holding the persisted tables.
    pub table_dir: PathBuf,

    /// `c` in the learning rate `c / (c + N(s, a))`.
    pub learning_rate_constant: f64,

    /// Discount factor for the bootstrapped next-state value (1.0 = undiscounted).
    pub discount: f64,

    /// Probability of taking the primary action; the other action gets the rest.
    pub confidence: f64,

    /// Dealer draws while below this total.
    pub dealer_stand: u8,

    /// Primary-action rule.
    pub exploration: ExplorationMode,

    /// Episodes between progress log lines (0 = no progress lines).
    pub progress_interval: u64,

    /// Start from zeroed tables instead of loading persisted ones.
    pub fresh: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1_000_000,
            seed: None,
            table_name: "blackjack".to_string(),
            table_dir: PathBuf::from("."),
            learning_rate_constant: 1000.0,
            discount: 1.0,
            confidence: 0.8,
            dealer_stand: 17,
            exploration: ExplorationMode::Argmax,
            progress_interval: 100_000,
            fresh: false,
        }
    }
}

impl TrainingConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a YAML file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TrainingConfig =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of episodes.
    #[must_use]
    pub fn with_episodes(mut self, episodes: u64) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the persisted table identifier.
    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Set the table directory.
    #[must_use]
    pub fn with_table_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.table_dir = dir.into();
        self
    }

    /// Set the learning-rate constant.
    #[must_use]
    pub fn with_learning_rate_constant(mut self, c: f64) -> Self {
        self.learning_rate_constant = c;
        self
    }

    /// Set the discount factor.
    #[must_use]
    pub fn with_discount(mut self, gamma: f64) -> Self {
        self.discount = gamma;
        self
    }

    /// Set the primary-action probability.
    #[must_use]
    pub fn with_confidence(mut self, p: f64) -> Self {
        self.confidence = p;
        self
    }

    /// Set the dealer stand threshold.
    #[must_use]
    pub fn with_dealer_stand(mut self, total: u8) -> Self {
        self.dealer_stand = total;
        self
    }

    /// Set the primary-action rule.
    #[must_use]
    pub fn with_exploration(mut self, mode: ExplorationMode) -> Self {
        self.exploration = mode;
        self
    }

    /// Set the progress logging interval.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Skip loading persisted tables.
    #[must_use]
    pub fn with_fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    /// Check every field is within its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::Invalid("episodes must be at least 1".into()));
        }
        validate_table_name(&self.table_name)?;
        if !(self.learning_rate_constant.is_finite() && self.learning_rate_constant > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate_constant must be positive, got {}",
                self.learning_rate_constant
            )));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(ConfigError::Invalid(format!(
                "discount must be within [0, 1], got {}",
                self.discount
            )));
        }
        validate_confidence(self.confidence)?;
        if !(12..=21).contains(&self.dealer_stand) {
            return Err(ConfigError::Invalid(format!(
                "dealer_stand must be within 12..=21, got {}",
                self.dealer_stand
            )));
        }
        Ok(())
    }
}

/// The primary action must stay more likely than the other one.
pub(crate) fn validate_confidence(confidence: f64) -> Result<(), ConfigError> {
    if !(confidence > 0.5 && confidence <= 1.0) {
        return Err(ConfigError::Invalid(format!(
            "confidence must be within (0.5, 1], got {confidence}"
        )));
    }
    Ok(())
}

fn validate_table_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("table_name must not be empty".into()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if name.starts_with('.') || !name.chars().all(allowed) {
        return Err(ConfigError::Invalid(format!(
            "table_name '{name}' may only contain letters, digits, '-', '_' and '.', and must not start with '.'"
        )));
    }
    Ok(())
}

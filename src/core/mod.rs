//! Core building blocks: seeded RNG, errors, configuration.
//!
//! Nothing in here knows about cards or Q-values; the game and learning
//! modules build on top of it.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{ExplorationMode, TrainingConfig};
pub use error::{ConfigError, Error, PersistenceError, Result};
pub use rng::{GameRng, GameRngState};

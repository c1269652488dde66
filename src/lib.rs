//! # blackjack-rl
//!
//! A simplified Blackjack environment and a tabular Q-learning agent that
//! learns to play it by self-play.
//!
//! ## Design Principles
//!
//! 1. **Environment owns the rules**: the agent only ever sees a `Percept`
//!    and answers with an `Action`. It never touches the deck or hands.
//!
//! 2. **Deterministic by seed**: every random choice draws from a `GameRng`.
//!    The trainer forks one stream per episode, so a seed replays a run.
//!
//! 3. **Explicit persistence**: tables are saved and loaded only when asked,
//!    under a caller-chosen name.
//!
//! ## Modules
//!
//! - `core`: RNG, errors, configuration
//! - `cards`: cards, hands, deck and card sources
//! - `env`: the Blackjack state machine and its percepts
//! - `agent`: Q-learning agent, baseline agent, tables and their store
//! - `training`: episode loop, training driver, run summaries
//! - `logging`: tracing subscriber setup

pub mod agent;
pub mod cards;
pub mod core;
pub mod env;
pub mod logging;
pub mod training;

// Re-export commonly used types
pub use crate::core::{Error, ExplorationMode, GameRng, GameRngState, Result, TrainingConfig};

pub use crate::cards::{Card, CardSource, Deck, Hand, Rank, StackedDeck, Suit};

pub use crate::env::{Action, BlackjackEnv, GameStatus, Percept, StateKey};

pub use crate::agent::{
    Agent, PolicyChart, QLearningAgent, QTable, StateActionKey, TablePaths, TableStore, ThresholdAgent,
    VisitCounts,
};

pub use crate::training::{EpisodeOutcome, TableOrigin, Trainer, TrainingReport, TrainingSession, TrainingSummary};

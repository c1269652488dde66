//! Training driver.
//!
//! ## Overview
//!
//! - **Trainer**: runs episodes sequentially, one forked RNG per episode
//! - **TrainingSummary**: win/loss/tie tallies and the win rate
//! - **TrainingSession**: load tables → train → save tables
//!
//! ## Usage
//!
//! ```
//! use blackjack_rl::agent::QLearningAgent;
//! use blackjack_rl::core::GameRng;
//! use blackjack_rl::env::BlackjackEnv;
//! use blackjack_rl::training::Trainer;
//!
//! let mut env = BlackjackEnv::new();
//! let mut agent = QLearningAgent::new();
//! let mut trainer = Trainer::new(GameRng::new(42));
//!
//! let summary = trainer.train(&mut env, &mut agent, 1_000).unwrap();
//! assert_eq!(summary.episodes, 1_000);
//! ```

pub mod session;
pub mod summary;
pub mod trainer;

pub use session::{TableOrigin, TrainingReport, TrainingSession};
pub use summary::{EpisodeOutcome, TrainingSummary};
pub use trainer::Trainer;

//! The Blackjack environment and the percepts it emits.
//!
//! The environment is a state machine over {Continue, Win, Lose, Tie}.
//! Each step it hands the agent a `Percept`; the agent answers with an
//! `Action` or `None` once the status is terminal.

pub mod environment;
pub mod percept;

pub use environment::{BlackjackEnv, DEALER_STAND};
pub use percept::{Action, GameStatus, Percept, StateKey};

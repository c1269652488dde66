//! Learning agents and their persisted tables.
//!
//! ## Overview
//!
//! - **StateActionKey**: (player total, usable ace, dealer total, action)
//! - **StateActionTable**: pre-populated `QTable` / `VisitCounts`
//! - **TableStore**: saves and loads a named pair of tables
//! - **QLearningAgent**: one-step TD learner with a soft policy
//! - **ThresholdAgent**: fixed "hit up to N" baseline
//! - **PolicyChart**: the learned policy as a readable grid
//!
//! ## Usage
//!
//! ```no_run
//! use blackjack_rl::agent::{QLearningAgent, TableStore};
//!
//! let store = TableStore::new("tables");
//! let mut agent = QLearningAgent::new();
//! agent.load_state(&store, "pickle")?;
//! // ... train ...
//! agent.save_state(&store, "pickle")?;
//! # Ok::<(), blackjack_rl::core::Error>(())
//! ```

pub mod key;
pub mod policy;
pub mod q_learning;
pub mod store;
pub mod table;
pub mod threshold;
pub mod traits;

pub use crate::core::ExplorationMode;
pub use key::{StateActionKey, KEY_COUNT, MAX_TOTAL};
pub use policy::{PolicyChart, PolicyRow, DEALER_UP_CARDS};
pub use q_learning::QLearningAgent;
pub use store::{TablePaths, TableStore};
pub use table::{QTable, StateActionTable, VisitCounts};
pub use threshold::{ThresholdAgent, DEFAULT_HIT_THRESHOLD};
pub use traits::Agent;

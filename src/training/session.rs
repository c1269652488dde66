//! A complete training run: load tables, train, save tables.

use tracing::{info, warn};

use super::summary::TrainingSummary;
use super::trainer::Trainer;
use crate::agent::{QLearningAgent, TablePaths, TableStore};
use crate::core::{Result, TrainingConfig};
use crate::env::BlackjackEnv;

/// Where the learned tables for a run came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableOrigin {
    /// Loaded from the store.
    Loaded,
    /// Zero-initialized because `fresh` was requested.
    Fresh,
    /// Zero-initialized because loading failed.
    Fallback,
}

/// What a finished run reports back.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub summary: TrainingSummary,
    pub paths: TablePaths,
    pub seed: u64,
    pub origin: TableOrigin,
}

/// Owns the configuration and table store for one run.
#[derive(Clone, Debug)]
pub struct TrainingSession {
    config: TrainingConfig,
    store: TableStore,
}

impl TrainingSession {
    /// Validate `config` and set up its table store.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let store = TableStore::new(config.table_dir.clone());
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Build the agent, loading persisted tables unless a fresh start was asked for.
    ///
    /// A failed load falls back to zeroed tables with a warning.
    pub fn prepare_agent(&self) -> Result<(QLearningAgent, TableOrigin)> {
        let mut agent = QLearningAgent::with_config(&self.config)?;
        let name = &self.config.table_name;

        if self.config.fresh {
            info!(name = %name, "starting from fresh tables");
            return Ok((agent, TableOrigin::Fresh));
        }

        match agent.load_state(&self.store, name) {
            Ok(()) => {
                info!(name = %name, dir = %self.store.dir().display(), "loaded persisted tables");
                Ok((agent, TableOrigin::Loaded))
            }
            Err(err) => {
                warn!(name = %name, error = %err, "could not load persisted tables, starting from fresh tables");
                Ok((agent, TableOrigin::Fallback))
            }
        }
    }

    /// Train for the configured number of episodes and persist the result.
    ///
    /// Returns the trained agent alongside the report.
    pub fn run(&self) -> Result<(QLearningAgent, TrainingReport)> {
        let (mut agent, origin) = self.prepare_agent()?;
        let mut env = BlackjackEnv::new().with_dealer_stand(self.config.dealer_stand);
        let mut trainer = Trainer::from_config(&self.config);
        let seed = trainer.rng().seed();

        let summary = trainer.train(&mut env, &mut agent, self.config.episodes)?;
        let paths = agent.save_state(&self.store, &self.config.table_name)?;
        info!(values = %paths.values.display(), visits = %paths.visits.display(), "saved tables");

        Ok((
            agent,
            TrainingReport {
                summary,
                paths,
                seed,
                origin,
            },
        ))
    }
}

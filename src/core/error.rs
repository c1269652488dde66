//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the environment, agent and training driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A card was requested from a source with nothing left to draw.
    #[error("cannot draw from an exhausted deck")]
    ExhaustedDeck,

    /// A scenario start asked for a hand total that cards cannot form.
    #[error("cannot synthesize a hand totalling {total} (expected 2..=21)")]
    InvalidScenario { total: u8 },

    /// An episode ran for more steps than the deck holds cards.
    #[error("episode did not terminate within {steps} steps")]
    EpisodeOverrun { steps: usize },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure to read or write a persisted value or visit-count table.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode or decode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("table file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// Failure to load or validate a training configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::ExhaustedDeck.to_string(), "cannot draw from an exhausted deck");
        assert_eq!(
            Error::InvalidScenario { total: 30 }.to_string(),
            "cannot synthesize a hand totalling 30 (expected 2..=21)"
        );
    }

    #[test]
    fn test_persistence_error_is_transparent() {
        let err: Error = PersistenceError::Corrupt {
            path: PathBuf::from("run.q.bin"),
            reason: "bad version".into(),
        }
        .into();

        assert_eq!(err.to_string(), "table file run.q.bin is corrupt: bad version");
    }
}

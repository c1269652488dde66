use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use blackjack_rl::agent::{PolicyChart, ThresholdAgent};
use blackjack_rl::core::{ExplorationMode, GameRng, TrainingConfig};
use blackjack_rl::env::BlackjackEnv;
use blackjack_rl::logging::{init_logging, LogFormat};
use blackjack_rl::training::{TableOrigin, Trainer, TrainingSession};

/// Train a Q-learning Blackjack agent by self-play.
#[derive(Debug, Parser)]
#[command(name = "blackjack-train", author, version, about = "Tabular Q-learning for Blackjack")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of episodes to play.
    #[arg(short, long, value_name = "N")]
    episodes: Option<u64>,

    /// Identifier the tables are loaded from and saved under.
    #[arg(short, long, value_name = "ID")]
    name: Option<String>,

    /// Directory holding the persisted tables.
    #[arg(long, value_name = "DIR")]
    table_dir: Option<PathBuf>,

    /// Master RNG seed (random if omitted).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Ignore persisted tables and start from zero.
    #[arg(long)]
    fresh: bool,

    /// Primary-action rule: argmax or literal.
    #[arg(long, value_name = "MODE")]
    exploration: Option<ExplorationMode>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: Level,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    /// Print the learned policy chart after training.
    #[arg(long)]
    print_policy: bool,

    /// Also play the same number of episodes with the hit-to-18 baseline.
    #[arg(long)]
    baseline: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_path(path)?,
            None => TrainingConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(name) = self.name {
            config.table_name = name;
        }
        if let Some(dir) = self.table_dir {
            config.table_dir = dir;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(mode) = self.exploration {
            config.exploration = mode;
        }
        if self.fresh {
            config.fresh = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.log_json { LogFormat::Json } else { LogFormat::Pretty };
    init_logging(cli.log_level, format)?;

    let print_policy = cli.print_policy;
    let baseline = cli.baseline;
    let config = cli.into_config()?;
    let episodes = config.episodes;

    let session = TrainingSession::new(config).context("setting up training session")?;
    let (agent, report) = session.run().context("training run failed")?;

    if report.origin == TableOrigin::Fallback {
        println!("No usable tables found; trained from scratch.");
    }
    println!("Seed: {}", report.seed);
    println!("{}", report.summary);
    println!("Win rate: {:.6}", report.summary.win_rate());
    println!("Value table: {}", report.paths.values.display());
    println!("Visit counts: {}", report.paths.visits.display());

    if print_policy {
        println!();
        print!("{}", PolicyChart::from_agent(&agent));
    }

    if baseline {
        let mut env = BlackjackEnv::new().with_dealer_stand(session.config().dealer_stand);
        let mut threshold = ThresholdAgent::default();
        let summary = Trainer::new(GameRng::new(report.seed))
            .train(&mut env, &mut threshold, episodes)
            .context("baseline run failed")?;
        println!("Baseline (hit to {}): {}", threshold.hit_threshold(), summary);
    }

    Ok(())
}

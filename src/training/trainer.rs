//! Episode loop and sequential training driver.
//!
//! The trainer is the only caller that moves the environment and the agent
//! forward. Each episode gets its own fork of the master RNG, and the agent's
//! episode state is reset exactly once before its first percept.

use tracing::{debug, info};

use super::summary::{EpisodeOutcome, TrainingSummary};
use crate::agent::Agent;
use crate::cards::{CardSource, DECK_SIZE};
use crate::core::{Error, GameRng, Result, TrainingConfig};
use crate::env::BlackjackEnv;

/// Runs episodes one after another and tallies the results.
#[derive(Clone, Debug)]
pub struct Trainer {
    rng: GameRng,
    progress_interval: u64,
}

impl Trainer {
    /// Create a trainer drawing episode streams from `rng`.
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            progress_interval: 0,
        }
    }

    /// Create a trainer seeded from the config, or from the OS if unseeded.
    pub fn from_config(config: &TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!(seed = rng.seed(), "training rng seeded");
        Self::new(rng).with_progress_interval(config.progress_interval)
    }

    /// Log a progress line every `interval` episodes (0 disables).
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Master RNG; its fork count equals the episodes started so far.
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Deal a fresh episode and play it to the end.
    pub fn run_episode<S, A>(env: &mut BlackjackEnv<S>, agent: &mut A, rng: &mut GameRng) -> Result<EpisodeOutcome>
    where
        S: CardSource,
        A: Agent + ?Sized,
    {
        env.reset(rng)?;
        play_out(env, agent, rng)
    }

    /// Play an episode starting from fixed player and dealer totals.
    pub fn run_scenario<S, A>(
        env: &mut BlackjackEnv<S>,
        agent: &mut A,
        player_total: u8,
        dealer_total: u8,
        rng: &mut GameRng,
    ) -> Result<EpisodeOutcome>
    where
        S: CardSource,
        A: Agent + ?Sized,
    {
        env.reset_to_totals(player_total, dealer_total, rng)?;
        play_out(env, agent, rng)
    }

    /// Run `episodes` episodes in sequence.
    pub fn train<S, A>(&mut self, env: &mut BlackjackEnv<S>, agent: &mut A, episodes: u64) -> Result<TrainingSummary>
    where
        S: CardSource,
        A: Agent + ?Sized,
    {
        let mut summary = TrainingSummary::new();

        for episode in 0..episodes {
            let mut rng = self.rng.fork();
            let outcome = Self::run_episode(env, agent, &mut rng)?;
            summary.record(&outcome);
            debug!(episode, status = %outcome.status, steps = outcome.steps, "episode finished");

            if self.progress_interval > 0 && (episode + 1) % self.progress_interval == 0 {
                info!(
                    episodes = summary.episodes,
                    wins = summary.wins,
                    win_rate = summary.win_rate(),
                    "training progress"
                );
            }
        }

        info!(
            episodes = summary.episodes,
            wins = summary.wins,
            losses = summary.losses,
            ties = summary.ties,
            win_rate = summary.win_rate(),
            "training complete"
        );
        Ok(summary)
    }
}

/// Alternate percept -> decision -> action until the agent stops.
fn play_out<S, A>(env: &mut BlackjackEnv<S>, agent: &mut A, rng: &mut GameRng) -> Result<EpisodeOutcome>
where
    S: CardSource,
    A: Agent + ?Sized,
{
    agent.reset_episode_state();

    // Every action consumes at most one card per step on the player side,
    // and Hold ends the episode, so the deck bounds the step count.
    for steps in 0..=DECK_SIZE {
        let percept = env.percept();
        match agent.decide_action(&percept, rng) {
            Some(action) => env.apply(action)?,
            None => {
                debug_assert!(percept.is_terminal(), "agent stopped on {percept}");
                return Ok(EpisodeOutcome {
                    status: percept.status,
                    reward: percept.reward,
                    steps,
                });
            }
        }
    }

    Err(Error::EpisodeOverrun { steps: DECK_SIZE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{QLearningAgent, ThresholdAgent};
    use crate::cards::{Rank, StackedDeck};
    use crate::env::{Action, GameStatus, Percept};

    /// Holds on the first percept, stops on terminal.
    struct AlwaysHold;

    impl Agent for AlwaysHold {
        fn decide_action(&mut self, percept: &Percept, _rng: &mut GameRng) -> Option<Action> {
            (!percept.is_terminal()).then_some(Action::Hold)
        }

        fn reset_episode_state(&mut self) {}
    }

    /// Ignores terminal status and never stops.
    struct NeverStops;

    impl Agent for NeverStops {
        fn decide_action(&mut self, _percept: &Percept, _rng: &mut GameRng) -> Option<Action> {
            Some(Action::Hold)
        }

        fn reset_episode_state(&mut self) {}
    }

    #[test]
    fn test_run_episode_terminates() {
        let mut env = BlackjackEnv::new();
        let mut agent = QLearningAgent::new();
        let mut master = GameRng::new(42);

        for _ in 0..500 {
            let mut rng = master.fork();
            let outcome = Trainer::run_episode(&mut env, &mut agent, &mut rng).unwrap();
            assert!(outcome.status.is_terminal());
            assert!([-1, 0, 1].contains(&outcome.reward));
            assert!(outcome.steps <= DECK_SIZE);
        }
    }

    #[test]
    fn test_hit_bust_episode() {
        let mut env = BlackjackEnv::with_source(StackedDeck::from_ranks(&[
            Rank::Ten,
            Rank::Six,
            Rank::Seven,
            Rank::Nine,
        ]));
        let mut agent = ThresholdAgent::default();

        let outcome = Trainer::run_episode(&mut env, &mut agent, &mut GameRng::new(0)).unwrap();
        assert_eq!(outcome.status, GameStatus::Lose);
        assert_eq!(outcome.reward, -1);
        assert_eq!(outcome.steps, 1);
    }

    #[test]
    fn test_natural_needs_no_action() {
        let mut env = BlackjackEnv::with_source(StackedDeck::from_ranks(&[Rank::Ace, Rank::Queen, Rank::Five]));
        let mut agent = QLearningAgent::new();

        let outcome = Trainer::run_episode(&mut env, &mut agent, &mut GameRng::new(0)).unwrap();
        assert_eq!(outcome.status, GameStatus::Win);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn test_scenario_hold_twenty_against_six() {
        // Dealer draws 4 (10) then Ten (20): tie.
        let source = StackedDeck::from_ranks(&[Rank::Four, Rank::Ten]);
        let mut env = BlackjackEnv::with_source(source);

        let outcome = Trainer::run_scenario(&mut env, &mut AlwaysHold, 20, 6, &mut GameRng::new(0)).unwrap();
        assert_eq!(outcome.status, GameStatus::Tie);
        assert_eq!(env.dealer_hand().total(), 20);
    }

    #[test]
    fn test_runaway_agent_is_stopped() {
        let mut env = BlackjackEnv::new();
        let mut rng = GameRng::new(0);
        let result = Trainer::run_scenario(&mut env, &mut NeverStops, 20, 10, &mut rng);

        assert!(matches!(result, Err(Error::EpisodeOverrun { .. }) | Err(Error::ExhaustedDeck)));
    }

    #[test]
    fn test_train_counts_every_episode() {
        let mut env = BlackjackEnv::new();
        let mut agent = ThresholdAgent::default();
        let mut trainer = Trainer::new(GameRng::new(5)).with_progress_interval(100);

        let summary = trainer.train(&mut env, &mut agent, 1000).unwrap();
        assert_eq!(summary.episodes, 1000);
        assert_eq!(summary.wins + summary.losses + summary.ties, 1000);
        assert_eq!(trainer.rng().fork_count(), 1000);
    }

    #[test]
    fn test_train_is_deterministic() {
        let run = || {
            let mut env = BlackjackEnv::new();
            let mut agent = QLearningAgent::new();
            let summary = Trainer::new(GameRng::new(77))
                .train(&mut env, &mut agent, 2000)
                .unwrap();
            (summary, agent.values().clone())
        };

        let (summary_a, values_a) = run();
        let (summary_b, values_b) = run();
        assert_eq!(summary_a, summary_b);
        assert_eq!(values_a, values_b);
    }
}

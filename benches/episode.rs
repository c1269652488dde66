use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blackjack_rl::agent::{QLearningAgent, ThresholdAgent};
use blackjack_rl::core::GameRng;
use blackjack_rl::env::BlackjackEnv;
use blackjack_rl::training::Trainer;

fn episode_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("episode");

    group.bench_function("q_learning_single", |b| {
        let mut env = BlackjackEnv::new();
        let mut agent = QLearningAgent::new();
        let mut master = GameRng::new(42);
        b.iter(|| {
            let mut rng = master.fork();
            black_box(Trainer::run_episode(&mut env, &mut agent, &mut rng))
        })
    });

    group.bench_function("threshold_single", |b| {
        let mut env = BlackjackEnv::new();
        let mut agent = ThresholdAgent::default();
        let mut master = GameRng::new(42);
        b.iter(|| {
            let mut rng = master.fork();
            black_box(Trainer::run_episode(&mut env, &mut agent, &mut rng))
        })
    });

    group.bench_function("train_10k", |b| {
        b.iter(|| {
            let mut env = BlackjackEnv::new();
            let mut agent = QLearningAgent::new();
            let summary = Trainer::new(GameRng::new(7)).train(&mut env, &mut agent, 10_000);
            black_box(summary)
        })
    });

    group.finish();
}

criterion_group!(benches, episode_bench);
criterion_main!(benches);

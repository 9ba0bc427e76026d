use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use tangle_inference::{PcConfig, PcEngine, SearchStrategy, StarOptions};
use test_fixtures::{complete_graph, SyntheticOracle};

fn config(search: SearchStrategy) -> PcConfig {
    PcConfig {
        max_cond_set_size: 3,
        search,
        ..PcConfig::default()
    }
}

fn bench_skeleton_exhaustive(c: &mut Criterion) {
    let graph = complete_graph(12);
    let engine = PcEngine::new(config(SearchStrategy::Exhaustive));
    c.bench_function("skeleton_exhaustive_12", |b| {
        b.iter_batched(
            || (graph.clone(), SyntheticOracle::new(7, 0.3)),
            |(mut graph, mut oracle)| engine.run_skeleton(&mut graph, &mut oracle).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_skeleton_star(c: &mut Criterion) {
    let graph = complete_graph(12);
    let engine = PcEngine::new(config(SearchStrategy::Star(StarOptions::default())));
    c.bench_function("skeleton_star_12", |b| {
        b.iter_batched(
            || (graph.clone(), SyntheticOracle::new(7, 0.3)),
            |(mut graph, mut oracle)| engine.run_skeleton(&mut graph, &mut oracle).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_run(c: &mut Criterion) {
    let graph = complete_graph(10);
    let engine = PcEngine::new(config(SearchStrategy::Exhaustive));
    c.bench_function("full_run_10", |b| {
        b.iter_batched(
            || (graph.clone(), SyntheticOracle::new(11, 0.3)),
            |(mut graph, mut oracle)| engine.run(&mut graph, &mut oracle).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_skeleton_exhaustive,
    bench_skeleton_star,
    bench_full_run
);
criterion_main!(benches);

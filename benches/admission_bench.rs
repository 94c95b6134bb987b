//! Criterion benchmarks for the admission pipeline stages.
//!
//! Uses synthetic datasets with rotated preferences and pseudo-random
//! scores so every stage has contention to work through.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_admission::graph::GraphBuilder;
use u_admission::greedy::GreedyConstructor;
use u_admission::model::{Capacity, Dataset, DatasetRecord};
use u_admission::refine::{simulated_annealing, tabu_search};
use u_admission::sa::SaConfig;
use u_admission::tabu::TabuConfig;

fn synthetic_dataset(agents: usize, resources: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(7);
    let agent_ids: Vec<String> = (1..=agents).map(|i| format!("S{i}")).collect();
    let resource_ids: Vec<String> = (1..=resources).map(|i| format!("C{i}")).collect();
    let seats = agents.div_ceil(resources);

    let mut record = DatasetRecord::new(agent_ids.clone(), resource_ids.clone());
    for r in &resource_ids {
        let capacity = Capacity::new(seats).with_eligibility_score(20.0);
        record = record.with_capacity(r, capacity);
    }
    for (i, a) in agent_ids.iter().enumerate() {
        let order: Vec<&str> = (0..resources)
            .map(|k| resource_ids[(k + i) % resources].as_str())
            .collect();
        let scores: Vec<(&str, f64)> = resource_ids
            .iter()
            .map(|r| (r.as_str(), rng.random_range(0.0..100.0)))
            .collect();
        record = record
            .with_agent_preferences(a, &order)
            .with_scores(a, &scores);
    }
    Dataset::from_record(record).expect("synthetic dataset is valid")
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");

    for &n in &[100, 1000] {
        let ds = synthetic_dataset(n, 10);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| black_box(GreedyConstructor::construct(black_box(ds))))
        });
    }
    group.finish();
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("dominance_graph");
    group.sample_size(10);

    for &n in &[50, 200] {
        let ds = synthetic_dataset(n, 5);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| black_box(GraphBuilder::unified(black_box(ds))))
        });
    }
    group.finish();
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine");
    group.sample_size(10);

    for &n in &[100, 500] {
        let ds = synthetic_dataset(n, 10);
        let initial = GreedyConstructor::construct(&ds).assignment;
        let sa_config = SaConfig::default();
        let tabu_config = TabuConfig::default();

        group.bench_with_input(BenchmarkId::new("sa", n), &ds, |b, ds| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(simulated_annealing(ds, &initial, &sa_config, &mut rng))
            })
        });
        group.bench_with_input(BenchmarkId::new("tabu", n), &ds, |b, ds| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(tabu_search(ds, &initial, &tabu_config, &mut rng))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_graph, bench_refine);
criterion_main!(benches);

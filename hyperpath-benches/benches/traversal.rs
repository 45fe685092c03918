//! Path search and component benchmarks over synthetic hypergraphs.
//!
//! Measures single shortest s-paths, K-shortest s-paths, and s-connected
//! component partitioning on stores of increasing size.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hyperpath_benches::{
    error::BenchSetupError,
    params::{KPathsBenchParams, TraversalBenchParams},
    source::{SyntheticConfig, engine},
};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Store sizes to benchmark.
const HYPEREDGE_COUNTS: &[usize] = &[200, 1_000, 5_000];

const OVERLAPS: &[usize] = &[1, 2];

const KS: &[usize] = &[1, 5, 10];

fn shortest_path_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("shortest_path");
    for &hyperedge_count in HYPEREDGE_COUNTS {
        let engine = engine(&SyntheticConfig::sized(hyperedge_count, SEED))?;
        let target = hyperedge_count - 1;
        for &s in OVERLAPS {
            let params = TraversalBenchParams { hyperedge_count, s };
            group.bench_with_input(BenchmarkId::from_parameter(params), &s, |b, &s| {
                b.iter(|| engine.shortest_path(0, target, s, None));
            });
        }
    }
    group.finish();
    Ok(())
}

fn k_shortest_paths_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("k_shortest_paths");
    group.sample_size(20);
    for &hyperedge_count in &HYPEREDGE_COUNTS[..2] {
        let engine = engine(&SyntheticConfig::sized(hyperedge_count, SEED))?;
        let target = hyperedge_count - 1;
        for &k in KS {
            let params = KPathsBenchParams { hyperedge_count, k };
            group.bench_with_input(BenchmarkId::from_parameter(params), &k, |b, &k| {
                b.iter(|| engine.k_shortest_paths(0, target, k, 1, Some(6)));
            });
        }
    }
    group.finish();
    Ok(())
}

fn connected_components_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("connected_components");
    for &hyperedge_count in HYPEREDGE_COUNTS {
        let engine = engine(&SyntheticConfig::sized(hyperedge_count, SEED))?;
        for &s in OVERLAPS {
            let params = TraversalBenchParams { hyperedge_count, s };
            group.bench_with_input(BenchmarkId::from_parameter(params), &s, |b, &s| {
                b.iter(|| engine.connected_components(s));
            });
        }
    }
    group.finish();
    Ok(())
}

fn shortest_path(c: &mut Criterion) {
    if let Err(err) = shortest_path_impl(c) {
        panic!("shortest_path benchmark setup failed: {err}");
    }
}

fn k_shortest_paths(c: &mut Criterion) {
    if let Err(err) = k_shortest_paths_impl(c) {
        panic!("k_shortest_paths benchmark setup failed: {err}");
    }
}

fn connected_components(c: &mut Criterion) {
    if let Err(err) = connected_components_impl(c) {
        panic!("connected_components benchmark setup failed: {err}");
    }
}

criterion_group!(benches, shortest_path, k_shortest_paths, connected_components);
criterion_main!(benches);

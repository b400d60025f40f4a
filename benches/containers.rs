//! Benchmarks for the three set variants
//!
//! Run with: cargo bench --bench containers
//!
//! Each group uses the reference key range `[1, 20]` with a varying number of
//! draws. Insertion benchmarks rebuild the container every iteration; traversal
//! benchmarks fill it once up front.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use setbench::bench::harness::{random_insertion, sequential_traversal, HashedSet, OrderedSet};
use setbench::{BenchConfig, BenchSet, CompositeKey, FlatSet, SetKind};

// Over [1, 20] a key's fold takes only 32 values, so hash-set insertion cost
// grows with the set; larger counts make the hashed group impractically slow.
const DRAWS: [usize; 3] = [1_000, 10_000, 50_000];

fn config(draws: usize) -> BenchConfig {
    BenchConfig::original()
        .with_iterations(draws)
        .expect("draw counts are non-zero")
}

fn filled<S: BenchSet>(config: &BenchConfig) -> S {
    let mut set = S::empty();
    set.reserve(config.reserve_for(S::KIND));
    random_insertion(&mut set, config).expect("config is valid");
    set
}

fn bench_insert_one<S: BenchSet>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("{}/insert", S::KIND));

    for draws in DRAWS {
        let config = config(draws);
        group.throughput(Throughput::Elements(draws as u64));
        group.bench_with_input(BenchmarkId::from_parameter(draws), &config, |b, config| {
            b.iter(|| black_box(filled::<S>(config)).len());
        });
    }

    group.finish();
}

fn bench_traverse_one<S: BenchSet>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("{}/traverse", S::KIND));

    for draws in DRAWS {
        let set = filled::<S>(&config(draws));
        group.throughput(Throughput::Elements(set.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(draws), &set, |b, set| {
            b.iter(|| sequential_traversal(black_box(set)));
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    bench_insert_one::<OrderedSet>(c);
    bench_insert_one::<HashedSet>(c);
    bench_insert_one::<FlatSet<CompositeKey>>(c);
}

fn bench_traverse(c: &mut Criterion) {
    bench_traverse_one::<OrderedSet>(c);
    bench_traverse_one::<HashedSet>(c);
    bench_traverse_one::<FlatSet<CompositeKey>>(c);
}

/// The full per-variant workload, as the demo runs it, with logging left off.
fn bench_run_variant(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_variant");
    group.sample_size(20);
    let config = config(10_000);

    for kind in SetKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| setbench::run_variant(kind, black_box(&config)).expect("config is valid"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_traverse, bench_run_variant);
criterion_main!(benches);

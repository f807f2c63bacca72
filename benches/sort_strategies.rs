//! Benchmarks comparing the sorting strategies.
//!
//! Run with: `cargo bench`
//! View reports in: `target/criterion/report/index.html`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use parsort_lib::{SortConfig, Strategy};

const INPUT_SIZE: usize = 200_000;
const WORKERS: usize = 4;

fn random_input(len: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0xBEEF);
    (0..len).map(|_| rng.gen()).collect()
}

/// Benchmark every strategy on the same random input.
fn bench_strategies(c: &mut Criterion) {
    let input = random_input(INPUT_SIZE);
    let mut group = c.benchmark_group("sort_strategies");
    group.throughput(Throughput::Elements(INPUT_SIZE as u64));

    for (name, strategy) in [
        ("sequential", Strategy::Sequential),
        ("segmented", Strategy::Segmented),
        ("bounded", Strategy::BoundedRecursive),
        ("pooled", Strategy::Pooled),
    ] {
        let config = SortConfig::new(strategy, WORKERS);
        group.bench_with_input(BenchmarkId::new(name, INPUT_SIZE), &input, |b, input| {
            b.iter(|| {
                let mut data = input.clone();
                config.sort(&mut data).unwrap();
                black_box(data);
            });
        });
    }

    group.finish();
}

/// Benchmark the segmented strategy across worker counts.
fn bench_segment_scaling(c: &mut Criterion) {
    let input = random_input(INPUT_SIZE);
    let mut group = c.benchmark_group("segment_scaling");
    group.throughput(Throughput::Elements(INPUT_SIZE as u64));

    for workers in [1, 2, 4, 8] {
        let config = SortConfig::new(Strategy::Segmented, workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &input, |b, input| {
            b.iter(|| {
                let mut data = input.clone();
                config.sort(&mut data).unwrap();
                black_box(data);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_segment_scaling);
criterion_main!(benches);

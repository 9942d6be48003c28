//! Completion benchmarks.
//!
//! Measures the completion engine on random planar distance matrices at
//! several missing fractions and sizes, and compares the estimators.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rdmfill_core::{
    test_utils::{mask_random, random_planar_distances},
    types::DMatrix,
};
use rdmfill_engine::{Collinear, Completer, PooledMedian, RightAngle, WeightedPooledMedian};
use std::time::Duration;

fn masked(n: usize, fraction: f64, seed: u64) -> DMatrix<f64> {
    let truth = random_planar_distances(n, seed);
    let mut rng = StdRng::seed_from_u64(seed + 1);
    mask_random(&truth, fraction, &mut rng)
}

fn bench_missing_fraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("missing_fraction");
    group.measurement_time(Duration::from_secs(5));

    let completer = Completer::<f64>::new();
    for fraction in [0.05, 0.1, 0.3, 0.5, 0.7] {
        let input = masked(100, fraction, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(fraction),
            &input,
            |b, input| b.iter(|| completer.complete(black_box(input))),
        );
    }

    group.finish();
}

fn bench_matrix_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_size");

    let completer = Completer::<f64>::new();
    for n in [25, 50, 100, 200] {
        let input = masked(n, 0.2, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| completer.complete(black_box(input)))
        });
    }

    group.finish();
}

fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimators");
    let input = masked(80, 0.3, 3);

    group.bench_function("pooled_median", |b| {
        let completer = Completer::new().with_estimator(PooledMedian);
        b.iter(|| completer.complete(black_box(&input)))
    });
    group.bench_function("weighted_pooled_median", |b| {
        let estimator = WeightedPooledMedian::new(1.0, 2.0).unwrap();
        let completer = Completer::new().with_estimator(estimator);
        b.iter(|| completer.complete(black_box(&input)))
    });
    group.bench_function("right_angle", |b| {
        let completer = Completer::new().with_estimator(RightAngle);
        b.iter(|| completer.complete(black_box(&input)))
    });
    group.bench_function("collinear", |b| {
        let completer = Completer::new().with_estimator(Collinear);
        b.iter(|| completer.complete(black_box(&input)))
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let inputs: Vec<_> = (0..16).map(|seed| masked(60, 0.3, seed)).collect();
    let completer = Completer::<f64>::new();

    c.bench_function("complete_many_16x60", |b| {
        b.iter_batched(
            || inputs.clone(),
            |batch| completer.complete_many(black_box(&batch)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_missing_fraction,
    bench_matrix_size,
    bench_estimators,
    bench_batch
);
criterion_main!(benches);

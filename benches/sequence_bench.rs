//! Benchmarks for sequence pipelines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lazyseq::prelude::*;

fn benchmark_map_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_filter");

    for size in [100usize, 1_000, 10_000].iter() {
        let data: Vec<i64> = (0..*size as i64).collect();

        group.bench_with_input(BenchmarkId::new("sequence", size), size, |b, _| {
            let seq = Sequence::of(data.clone())
                .map(|n| n * 3)
                .filter(|n| n % 2 == 0);
            b.iter(|| black_box(seq.count().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("std_iterator", size), size, |b, _| {
            b.iter(|| {
                black_box(
                    data.iter()
                        .map(|n| n * 3)
                        .filter(|n| n % 2 == 0)
                        .count(),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_windowed(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowed");

    let data: Vec<i32> = (0..1_000).collect();

    for window_size in [2, 5, 10, 20].iter() {
        group.bench_with_input(
            BenchmarkId::new("collect", window_size),
            window_size,
            |b, &window_size| {
                let seq = Sequence::of(data.clone()).windowed(window_size);
                b.iter(|| black_box(seq.to_list().unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("count", window_size),
            window_size,
            |b, &window_size| {
                let seq = Sequence::of(data.clone()).windowed(window_size);
                b.iter(|| black_box(seq.count().unwrap()));
            },
        );
    }

    group.finish();
}

fn benchmark_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<f64> = (0..10_000).map(|_| rng.gen_range(-1.0e6..1.0e6)).collect();

    group.bench_function("stats_single_pass", |b| {
        let seq = DoubleSequence::of(data.clone());
        b.iter(|| black_box(seq.stats().unwrap().standard_deviation()));
    });

    group.bench_function("running_statistics_gatherer", |b| {
        let seq = DoubleSequence::of(data.clone())
            .boxed()
            .gather(gatherers::running_statistics());
        b.iter(|| black_box(seq.count().unwrap()));
    });

    group.finish();
}

fn benchmark_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted");

    let mut rng = StdRng::seed_from_u64(7);

    for size in [100usize, 1_000, 10_000].iter() {
        let data: Vec<i64> = (0..*size).map(|_| rng.gen()).collect();

        group.bench_with_input(BenchmarkId::new("random", size), size, |b, _| {
            let seq = LongSequence::of(data.clone());
            b.iter(|| black_box(seq.sorted().unwrap().to_list().unwrap()));
        });

        let mut ascending = data.clone();
        ascending.sort_unstable();
        group.bench_with_input(BenchmarkId::new("presorted", size), size, |b, _| {
            let seq = LongSequence::of(ascending.clone());
            b.iter(|| black_box(seq.sorted().unwrap().to_list().unwrap()));
        });
    }

    group.finish();
}

fn benchmark_range_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_traversal");

    group.bench_function("int_range_sum", |b| {
        let seq = IntRange::closed(1, 100_000).sequence();
        b.iter(|| black_box(seq.sum().unwrap()));
    });

    group.bench_function("double_range_stats", |b| {
        let seq = DoubleRange::closed_step(0.0, 100.0, 0.01).sequence();
        b.iter(|| black_box(seq.stats().unwrap().average()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map_filter,
    benchmark_windowed,
    benchmark_statistics,
    benchmark_sorted,
    benchmark_range_traversal
);
criterion_main!(benches);

//! Criterion benchmarks for curve sampling and rosette replication.
//! Control points are drawn from a seeded RNG so runs are comparable.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rosette::curve::sample;
use rosette::geom::{Point, Polyline};
use rosette::replicate::build_rosette;

fn random_controls(n: usize, seed: u64) -> Polyline {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(-120.0..120.0), rng.gen_range(-120.0..120.0)))
        .collect()
}

fn bench_rosette(c: &mut Criterion) {
    let mut group = c.benchmark_group("rosette");
    for &steps in &[8usize, 48, 256] {
        group.bench_with_input(BenchmarkId::new("sample_cubic_offset", steps), &steps, |b, &s| {
            b.iter_batched(
                || random_controls(4, 41),
                |pts| sample(&pts, s, 3.0),
                BatchSize::SmallInput,
            )
        });
    }
    let base: Vec<Polyline> = (0..3).map(|k| sample(&random_controls(4, 7 + k), 48, 0.0)).collect();
    for &order in &[8usize, 24, 96] {
        group.bench_with_input(BenchmarkId::new("build_rosette", order), &order, |b, &n| {
            b.iter(|| build_rosette(&base, n, 1.66, true))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rosette);
criterion_main!(benches);

//! Accumulation Benchmarks
//!
//! Compares the scalar accumulator with the vectorized driver at every lane
//! width, for single and double precision and for the bivariate case.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vstat::accumulate;
use vstat::stats::UnivariateAccumulator;
use vstat::{AccumulateConfig, LaneWidth};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];
const WIDTHS: [LaneWidth; 4] = [LaneWidth::X2, LaneWidth::X4, LaneWidth::X8, LaneWidth::X16];

fn random_data(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn bench_univariate_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Univariate f64");

    for n in SIZES {
        let data = random_data(n, 42);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("scalar", n), &data, |b, data| {
            b.iter(|| {
                let mut acc = UnivariateAccumulator::<f64>::new();
                for &x in data.iter() {
                    acc.update(x);
                }
                black_box(acc.statistics())
            })
        });

        for width in WIDTHS {
            let config = AccumulateConfig::new().with_lane_width(width);
            let id = BenchmarkId::new(format!("x{}", width.lanes()), n);
            group.bench_with_input(id, &data, |b, data| {
                b.iter(|| black_box(accumulate::univariate_with(&config, data)))
            });
        }
    }

    group.finish();
}

fn bench_univariate_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Univariate f32");

    for n in SIZES {
        let data: Vec<f32> = random_data(n, 7).into_iter().map(|x| x as f32).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("native", n), &data, |b, data| {
            b.iter(|| black_box(accumulate::univariate(data)))
        });

        group.bench_with_input(BenchmarkId::new("weighted", n), &data, |b, data| {
            b.iter(|| black_box(accumulate::univariate_weighted(data, data)))
        });
    }

    group.finish();
}

fn bench_bivariate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bivariate f64");
    group.sample_size(20);

    for n in SIZES {
        let x = random_data(n, 1);
        let y = random_data(n, 2);
        group.throughput(Throughput::Elements(n as u64));

        for width in WIDTHS {
            let config = AccumulateConfig::new().with_lane_width(width);
            let id = BenchmarkId::new(format!("x{}", width.lanes()), n);
            group.bench_with_input(id, &(&x, &y), |b, (x, y)| {
                b.iter(|| black_box(accumulate::bivariate_with(&config, x.as_slice(), y.as_slice())))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_univariate_f64,
    bench_univariate_f32,
    bench_bivariate
);
criterion_main!(benches);

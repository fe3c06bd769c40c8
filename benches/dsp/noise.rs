//! Benchmarks for noise buffer generation.
//!
//! Runs on the control thread once per `play`, so the interesting number is
//! the cost of a whole bed buffer rather than a block.

use std::hint::black_box;

use ambient_dsp::dsp::noise::NoiseFactory;
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");
    group.sample_size(20);

    for seconds in [1.0f32, 2.0] {
        let mut factory = NoiseFactory::new(48_000.0, SmallRng::seed_from_u64(1));
        group.bench_with_input(BenchmarkId::new("white", seconds), &seconds, |b, &s| {
            b.iter(|| black_box(factory.generate(s)))
        });

        let mut factory = NoiseFactory::new(48_000.0, SmallRng::seed_from_u64(2));
        group.bench_with_input(BenchmarkId::new("crackle", seconds), &seconds, |b, &s| {
            b.iter(|| black_box(factory.crackle(s)))
        });
    }

    group.finish();
}

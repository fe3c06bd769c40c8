//! Benchmarks for the phase-accumulator oscillator.

use std::hint::black_box;

use ambient_dsp::dsp::oscillator::OscillatorBlock;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(2_000.0), 48_000.0);
            })
        });

        let mut osc = OscillatorBlock::sawtooth();
        group.bench_with_input(BenchmarkId::new("saw", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(55.0), 48_000.0);
            })
        });
    }

    group.finish();
}

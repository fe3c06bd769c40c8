//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use ambient_dsp::dsp::filter::SVFilter;
use ambient_dsp::graph::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, make) in [
            ("lowpass", SVFilter::lowpass as fn(f32) -> SVFilter),
            ("highpass", SVFilter::highpass),
            ("bandpass", SVFilter::bandpass),
        ] {
            let mut filter = make(400.0);
            filter.set_q(0.5);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // cutoff changes every block, as under an LFO
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = input.clone();
        let mut cutoff = 300.0;
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 700.0 { 300.0 } else { cutoff + 1.0 };
                filter.set_cutoff(cutoff);
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}

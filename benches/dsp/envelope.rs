//! Benchmarks for the one-shot envelope.

use std::hint::black_box;

use ambient_dsp::dsp::envelope::{Envelope, ReleaseCurve};
use ambient_dsp::graph::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let curves = [
            ("linear", ReleaseCurve::Linear),
            ("exponential", ReleaseCurve::Exponential),
        ];
        for (name, curve) in curves {
            let mut env = Envelope::one_shot(0.3, 0.1, 2.0, curve);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    if !env.is_active() {
                        env.trigger();
                    }
                    env.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}

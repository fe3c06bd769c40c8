//! Benchmarks for rendering each soundscape bed.

use std::hint::black_box;

use ambient_dsp::dsp::noise::NoiseFactory;
use ambient_dsp::graph::RenderCtx;
use ambient_dsp::soundscape::build_bed;
use ambient_dsp::SoundType;
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

pub fn bench_beds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/beds");
    let ctx = RenderCtx::new(48_000.0);
    let mut noise = NoiseFactory::new(48_000.0, SmallRng::seed_from_u64(3));
    let size = 512;

    for sound in SoundType::ALL {
        let mut bed = build_bed(&sound.recipe(), &mut noise, 2.0);
        let mut buffer = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new(sound.name(), size), &size, |b, _| {
            b.iter(|| bed.render_block(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}

//! Benchmarks for the output bus: a bed plus overlapping transients, mixed
//! and written interleaved, the way the cpal callback runs it.

use std::hint::black_box;

use ambient_dsp::dsp::noise::NoiseFactory;
use ambient_dsp::io::bus::{Command, MasterGain, NodeId, OutputBus};
use ambient_dsp::soundscape::build_bed;
use ambient_dsp::voices::TransientKind;
use ambient_dsp::SoundType;
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

use crate::BLOCK_SIZES;

pub fn bench_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bus");
    let mut rng = SmallRng::seed_from_u64(4);
    let mut noise = NoiseFactory::new(48_000.0, SmallRng::seed_from_u64(5));

    for &size in BLOCK_SIZES {
        let (mut bus, mut handle) = OutputBus::new(MasterGain::new(0.5), 64);
        bus.set_sample_rate(48_000.0);

        let bed = build_bed(&SoundType::Thunder.recipe(), &mut noise, 2.0);
        let _ = handle.commands.push(Command::Connect {
            id: NodeId(0),
            node: bed,
        });
        for id in 1..=4 {
            let node = TransientKind::Cricket.voice(&mut rng);
            let _ = handle.commands.push(Command::Connect {
                id: NodeId(id),
                node,
            });
        }

        let mut data = vec![0.0f32; size * 2];
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| bus.render_interleaved(black_box(&mut data), 2))
        });
    }

    group.finish();
}

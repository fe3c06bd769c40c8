//! Render a soundscape without audio hardware and write it as raw f32 PCM.
//!
//! Run with: cargo run --example offline_bounce -- thunder 60 thunder.f32
//!
//! Play the result with e.g. `ffplay -f f32le -ar 48000 -ac 1 thunder.f32`.

use std::{fs::File, io::BufWriter, io::Write, time::Duration};

use ambient_dsp::{
    engine::clock::ManualClock,
    io::offline::OfflineBackend,
    EngineConfig, PlaybackController, SoundType,
};
use color_eyre::eyre::{Result, WrapErr};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let sound: SoundType = args.next().as_deref().unwrap_or("rain").parse()?;
    let seconds: f32 = match args.next() {
        Some(arg) => arg.parse().wrap_err("duration must be a number of seconds")?,
        None => 10.0,
    };
    let path = args.next().unwrap_or_else(|| format!("{sound}.f32"));

    let backend = OfflineBackend::new(SAMPLE_RATE);
    let tap = backend.tap();
    let clock = ManualClock::new();
    let mut player = PlaybackController::new(
        EngineConfig::default().with_seed(1),
        Box::new(backend),
        Box::new(clock.clone()),
    );
    player.play(sound);

    let file = File::create(&path).wrap_err_with(|| format!("failed to create {path}"))?;
    let mut out = BufWriter::new(file);

    let blocks = (seconds / BLOCK.as_secs_f32()).ceil() as usize;
    let mut peak = 0.0f32;
    let mut energy = 0.0f64;
    let mut frames = 0usize;
    let mut transients = 0usize;

    for _ in 0..blocks {
        clock.advance(BLOCK);
        transients += player.pump().len();

        let block = tap.render_seconds(BLOCK.as_secs_f32());
        for &sample in &block {
            peak = peak.max(sample.abs());
            energy += f64::from(sample * sample);
            out.write_all(&sample.to_le_bytes())?;
        }
        frames += block.len();
    }
    out.flush()?;

    let rms = (energy / frames.max(1) as f64).sqrt();
    println!(
        "{sound}: {frames} frames, peak {peak:.3}, rms {rms:.4}, {transients} transients -> {path}"
    );
    Ok(())
}

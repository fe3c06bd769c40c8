//! Play a soundscape on the default output device.
//!
//! Run with: cargo run --example play -- forest 30
//!
//! Set `RUST_LOG=ambient_dsp=trace` to watch transients fire.

use std::{thread, time::Duration};

use ambient_dsp::{EngineConfig, PlaybackController, SoundType};
use color_eyre::eyre::{eyre, Result, WrapErr};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let sound: SoundType = args
        .next()
        .as_deref()
        .unwrap_or("forest")
        .parse()
        .wrap_err("unknown sound, try: rain forest ocean fire wind cafe thunder night")?;
    let seconds: u64 = match args.next() {
        Some(arg) => arg.parse().wrap_err("duration must be whole seconds")?,
        None => 30,
    };

    let mut player = PlaybackController::with_default_output(EngineConfig::default());
    player.play(sound);
    if !player.is_playing() {
        return Err(eyre!("no audio output available"));
    }

    println!("Playing {sound} for {seconds}s... Press Ctrl+C to stop");

    let tick = Duration::from_millis(20);
    let ticks = seconds * 1_000 / tick.as_millis() as u64;
    for _ in 0..ticks {
        for transient in player.pump() {
            println!("  {transient}");
        }
        thread::sleep(tick);
    }

    player.stop();
    Ok(())
}

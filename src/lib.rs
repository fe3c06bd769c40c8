//! Procedural ambient soundscapes.
//!
//! Each soundscape is a looped noise bed shaped by a filter chain, optionally
//! swept by a slow LFO, with short one-shot voices layered on top at random
//! intervals. Everything is synthesized; there are no samples.
//!
//! The public entry point is [`PlaybackController`]:
//!
//! ```no_run
//! use ambient_dsp::{EngineConfig, PlaybackController, SoundType};
//!
//! let mut player = PlaybackController::with_default_output(EngineConfig::default());
//! player.play(SoundType::Forest);
//! loop {
//!     player.pump();
//!     std::thread::sleep(std::time::Duration::from_millis(20));
//! }
//! ```

pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod io;
pub mod soundscape; // Recipes per sound type
pub mod voices;

pub use config::EngineConfig;
pub use engine::PlaybackController;
pub use error::{Error, Result};
pub use soundscape::SoundType;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

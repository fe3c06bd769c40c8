//! Headless output for tests and offline rendering.
//!
//! `OfflineBackend` opens instantly and never touches hardware. Audio is
//! pulled on demand through an [`OfflineTap`], which plays the part of the
//! device callback.
//!
//! ```
//! use ambient_dsp::{io::offline::OfflineBackend, EngineConfig, PlaybackController, SoundType};
//! use ambient_dsp::engine::clock::ManualClock;
//!
//! let backend = OfflineBackend::new(48_000.0);
//! let tap = backend.tap();
//! let mut player = PlaybackController::new(
//!     EngineConfig::default(),
//!     Box::new(backend),
//!     Box::new(ManualClock::new()),
//! );
//!
//! player.play(SoundType::Rain);
//! let audio = tap.render_seconds(0.5);
//! assert_eq!(audio.len(), 24_000);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::Result,
    io::{
        backend::{AudioBackend, OutputStream},
        bus::OutputBus,
    },
};

struct OfflineShared {
    bus: Option<OutputBus>,
    running: bool,
    sample_rate: f32,
}

fn lock(shared: &Mutex<OfflineShared>) -> MutexGuard<'_, OfflineShared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct OfflineBackend {
    shared: Arc<Mutex<OfflineShared>>,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            shared: Arc::new(Mutex::new(OfflineShared {
                bus: None,
                running: false,
                sample_rate,
            })),
        }
    }

    /// A handle for pulling audio once the engine has opened the backend.
    pub fn tap(&self) -> OfflineTap {
        OfflineTap {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl AudioBackend for OfflineBackend {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn open(&mut self, mut bus: OutputBus) -> Result<Box<dyn OutputStream>> {
        let mut shared = lock(&self.shared);
        bus.set_sample_rate(shared.sample_rate);
        shared.bus = Some(bus);
        shared.running = false;

        Ok(Box::new(OfflineStream {
            shared: Arc::clone(&self.shared),
            sample_rate: shared.sample_rate,
        }))
    }
}

struct OfflineStream {
    shared: Arc<Mutex<OfflineShared>>,
    sample_rate: f32,
}

impl OutputStream for OfflineStream {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn resume(&mut self) -> Result<()> {
        lock(&self.shared).running = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        lock(&self.shared).running = false;
        Ok(())
    }
}

impl Drop for OfflineStream {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        shared.bus = None;
        shared.running = false;
    }
}

#[derive(Clone)]
pub struct OfflineTap {
    shared: Arc<Mutex<OfflineShared>>,
}

impl OfflineTap {
    /// Pull mono audio. Silence while the stream is suspended or closed.
    pub fn render(&self, out: &mut [f32]) {
        let mut shared = lock(&self.shared);
        let running = shared.running;
        match shared.bus.as_mut() {
            Some(bus) if running => bus.render(out),
            _ => out.fill(0.0),
        }
    }

    pub fn render_seconds(&self, seconds: f32) -> Vec<f32> {
        let frames = (seconds.max(0.0) * self.sample_rate()) as usize;
        let mut out = vec![0.0; frames];
        self.render(&mut out);
        out
    }

    pub fn sample_rate(&self) -> f32 {
        lock(&self.shared).sample_rate
    }

    pub fn is_open(&self) -> bool {
        lock(&self.shared).bus.is_some()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).running
    }

    /// Nodes the bus is mixing, as of the last render.
    pub fn voice_count(&self) -> usize {
        lock(&self.shared).bus.as_ref().map_or(0, OutputBus::voice_count)
    }
}

use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::{
    config::EngineConfig,
    dsp::noise::NoiseFactory,
    engine::{
        active::{ActiveSound, NodeRole, TransientEvent},
        clock::{Clock, SystemClock},
        scheduler::TransientScheduler,
        session::{AudioSessionHost, SessionState},
    },
    error::Result,
    io::{backend::AudioBackend, bus::MasterGain, cpal_backend::CpalBackend},
    soundscape::{build_bed, SoundType},
    voices::TransientKind,
};

/// The public face of the engine: one soundscape at a time.
///
/// None of the control methods return errors. If the audio output cannot be
/// opened, `play` logs a warning and the engine stays silent.
///
/// Transient layers (birds, crickets, thunder) are driven by [`pump`], which
/// the host calls from its event loop.
///
/// ```
/// use ambient_dsp::{engine::clock::ManualClock, io::offline::OfflineBackend};
/// use ambient_dsp::{EngineConfig, PlaybackController, SoundType};
///
/// let mut player = PlaybackController::new(
///     EngineConfig::default().with_seed(1),
///     Box::new(OfflineBackend::new(48_000.0)),
///     Box::new(ManualClock::new()),
/// );
///
/// player.play(SoundType::Ocean);
/// player.set_volume(0.2);
/// assert_eq!(player.current_type(), Some(SoundType::Ocean));
///
/// player.stop();
/// assert!(!player.is_playing());
/// ```
///
/// [`pump`]: PlaybackController::pump
pub struct PlaybackController {
    config: EngineConfig,
    session: AudioSessionHost,
    scheduler: TransientScheduler<TransientEvent>,
    clock: Box<dyn Clock>,
    noise: NoiseFactory,
    voice_rng: SmallRng,
    active: Option<ActiveSound>,
    generation: u64,
}

fn rng_stream(seed: Option<u64>, stream: u64) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(stream)),
        None => SmallRng::from_os_rng(),
    }
}

impl PlaybackController {
    pub fn new(
        config: EngineConfig,
        backend: Box<dyn AudioBackend>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let master = MasterGain::new(config.initial_volume);
        let session = AudioSessionHost::new(backend, master, config.command_capacity);

        // sample rate is corrected once the output is open
        let noise = NoiseFactory::new(48_000.0, rng_stream(config.seed, 0))
            .with_crackle(config.crackle_probability, config.crackle_decay);

        Self {
            scheduler: TransientScheduler::new(rng_stream(config.seed, 1)),
            voice_rng: rng_stream(config.seed, 2),
            noise,
            session,
            clock,
            config,
            active: None,
            generation: 0,
        }
    }

    /// Realtime playback on the default output device.
    pub fn with_default_output(config: EngineConfig) -> Self {
        Self::new(
            config,
            Box::new(CpalBackend::new()),
            Box::new(SystemClock::new()),
        )
    }

    /// Stop whatever is playing and start `kind`.
    pub fn play(&mut self, kind: SoundType) {
        self.stop();

        let sample_rate = match self.session.ensure_running() {
            Ok(sample_rate) => sample_rate,
            Err(err) => {
                warn!(sound = %kind, error = %err, "audio output unavailable, staying silent");
                return;
            }
        };

        self.generation += 1;
        let mut active = ActiveSound::new(kind, self.generation);

        if let Err(err) = self.build(&mut active, sample_rate) {
            warn!(sound = %kind, error = %err, "failed to build soundscape, staying silent");
            active.teardown(&mut self.session, &mut self.scheduler);
            return;
        }

        active.mark_running();
        info!(
            sound = %kind,
            generation = self.generation,
            sample_rate,
            nodes = active.nodes().len(),
            "soundscape started"
        );
        self.active = Some(active);
    }

    fn build(&mut self, active: &mut ActiveSound, sample_rate: f32) -> Result<()> {
        let recipe = active.kind().recipe();

        self.noise.set_sample_rate(sample_rate);
        let bed = build_bed(&recipe, &mut self.noise, self.config.noise_seconds);
        active.connect(&mut self.session, bed, NodeRole::Bed)?;

        let now = self.clock.now();
        for layer in recipe.layers {
            let timer = self.scheduler.schedule_recurring(
                now,
                layer.every,
                active.live_flag(),
                TransientEvent::Emit(layer.kind),
            );
            active.track_timer(timer);
        }

        Ok(())
    }

    /// Tear down the current sound. Does nothing if none is playing.
    pub fn stop(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.teardown(&mut self.session, &mut self.scheduler);
            debug!(
                sound = %active.kind(),
                generation = active.generation(),
                emitted = active.emitted(),
                "soundscape stopped"
            );
        }
        self.session.collect_retired();
    }

    /// Fire every timer that has come due and free retired nodes.
    ///
    /// A voice always gets its full envelope from the moment it is connected.
    /// A transient whose whole envelope would already be over by `now` is
    /// skipped rather than connected and released in the same call.
    ///
    /// Returns the transients emitted by this call, in due order.
    pub fn pump(&mut self) -> Vec<TransientKind> {
        let now = self.clock.now();
        let mut emitted = Vec::new();

        while let Some(firing) = self.scheduler.pop_due(now) {
            let Some(active) = self.active.as_mut() else {
                continue;
            };

            match firing.event {
                TransientEvent::Emit(kind) if firing.due + kind.duration() <= now => {
                    trace!(transient = %kind, due = ?firing.due, "transient expired, skipped");
                }
                TransientEvent::Emit(kind) => {
                    let result = active.emit(
                        kind,
                        now,
                        &mut self.session,
                        &mut self.scheduler,
                        &mut self.voice_rng,
                    );
                    match result {
                        Ok(_) => emitted.push(kind),
                        Err(err) => warn!(transient = %kind, error = %err, "transient dropped"),
                    }
                }
                TransientEvent::Release(id) => {
                    active.release(id, &mut self.session);
                }
            }
        }

        self.session.collect_retired();
        emitted
    }

    /// Set the master volume, clamped to [0, 1]. Survives sound changes.
    pub fn set_volume(&mut self, volume: f32) {
        self.session.master().set(volume);
    }

    pub fn volume(&self) -> f32 {
        self.session.master().get()
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_type(&self) -> Option<SoundType> {
        self.active.as_ref().map(ActiveSound::kind)
    }

    /// Pause the output stream. The current sound is kept; the next `play`
    /// resumes the stream.
    pub fn suspend(&mut self) {
        if let Err(err) = self.session.suspend() {
            warn!(error = %err, "failed to suspend audio session");
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Nodes connected to the output, bed and live transients included.
    pub fn active_node_count(&self) -> usize {
        self.session.connected_count()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// When the earliest pending timer, emit or release, comes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Incremented by every `play` that reaches the output.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}

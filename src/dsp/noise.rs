//! Stochastic sample sources.
//!
//! Every bed in a soundscape starts life as a block of random samples that
//! gets looped and filtered. `NoiseFactory` renders those blocks once per
//! sound on the control thread; the audio thread only ever reads them.

use std::{ops::Deref, sync::Arc};

use rand::{rngs::SmallRng, Rng};

/*
Two generators:

  white     each sample an independent uniform draw in [-1, 1]. Looped for
            rain, forest wind, ocean, wind, café, night and thunder beds. A
            buffer of one to two seconds loops without audible periodicity
            once it has been filtered.

  crackle   a leaky, correlated source for fire. Each sample is, with small
            probability p, a fresh uniform draw; otherwise it is the previous
            sample times `decay`. The result is a sparse train of pops, each
            dying away exponentially:

              x[n] = fresh draw          with probability p
              x[n] = decay × x[n-1]      otherwise

            With p = 0.01 a pop lands roughly every 100 samples (~2 ms at
            48 kHz) and each pop decays by 40 dB in ~460 samples.
*/

/// Default fresh-draw probability for the crackle generator.
pub const CRACKLE_PROBABILITY: f32 = 0.01;
/// Default per-sample decay for the crackle generator.
pub const CRACKLE_DECAY: f32 = 0.99;
/// Longest buffer either generator will render.
pub const MAX_NOISE_SECONDS: f32 = 60.0;

/// Clamp a buffer length into [0, `MAX_NOISE_SECONDS`], mapping NaN to zero.
pub fn clamp_noise_seconds(seconds: f32) -> f32 {
    seconds.max(0.0).min(MAX_NOISE_SECONDS)
}

/// Immutable block of samples in [-1, 1], shared by reference count.
///
/// Cloning is cheap; the samples themselves are never copied or mutated after
/// generation, so the same buffer can be handed to the audio thread.
#[derive(Clone, Debug)]
pub struct NoiseBuffer {
    samples: Arc<[f32]>,
}

impl NoiseBuffer {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }
}

impl Deref for NoiseBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}

/// Which generator a bed is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    White,
    Crackle,
}

pub struct NoiseFactory {
    sample_rate: f32,
    crackle_probability: f32,
    crackle_decay: f32,
    rng: SmallRng,
}

impl NoiseFactory {
    pub fn new(sample_rate: f32, rng: SmallRng) -> Self {
        Self {
            sample_rate,
            crackle_probability: CRACKLE_PROBABILITY,
            crackle_decay: CRACKLE_DECAY,
            rng,
        }
    }

    pub fn with_crackle(mut self, probability: f32, decay: f32) -> Self {
        self.crackle_probability = probability.clamp(0.0, 1.0);
        self.crackle_decay = decay.clamp(0.0, 1.0);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Number of samples a buffer of `duration_secs` holds at this rate.
    ///
    /// Durations are clamped to [0, `MAX_NOISE_SECONDS`]; NaN counts as zero.
    pub fn frames_for(&self, duration_secs: f32) -> usize {
        (clamp_noise_seconds(duration_secs) * self.sample_rate) as usize
    }

    /// Independent uniform noise.
    pub fn generate(&mut self, duration_secs: f32) -> NoiseBuffer {
        let frames = self.frames_for(duration_secs);
        let samples = (0..frames)
            .map(|_| self.rng.random_range(-1.0..=1.0))
            .collect();
        NoiseBuffer::from_samples(samples)
    }

    /// Sparse, exponentially decaying pops (fire).
    pub fn crackle(&mut self, duration_secs: f32) -> NoiseBuffer {
        let frames = self.frames_for(duration_secs);
        let mut samples = Vec::with_capacity(frames);
        let mut last = 0.0f32;

        for _ in 0..frames {
            last = if self.rng.random::<f32>() < self.crackle_probability {
                self.rng.random_range(-1.0..=1.0)
            } else {
                last * self.crackle_decay
            };
            samples.push(last);
        }

        NoiseBuffer::from_samples(samples)
    }

    pub fn render(&mut self, kind: NoiseKind, duration_secs: f32) -> NoiseBuffer {
        match kind {
            NoiseKind::White => self.generate(duration_secs),
            NoiseKind::Crackle => self.crackle(duration_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn factory(seed: u64) -> NoiseFactory {
        NoiseFactory::new(SAMPLE_RATE, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn white_buffer_has_requested_length() {
        let buffer = factory(1).generate(2.0);
        assert_eq!(buffer.len(), 96_000);
    }

    #[test]
    fn white_samples_are_bounded_and_centred() {
        let buffer = factory(2).generate(2.0);

        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(buffer.mean().abs() < 0.02, "mean {}", buffer.mean());
    }

    #[test]
    fn successive_buffers_are_uncorrelated() {
        let mut noise = factory(3);
        let a = noise.generate(2.0);
        let b = noise.generate(2.0);

        assert_ne!(&a[..], &b[..]);

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let energy_a: f32 = a.iter().map(|x| x * x).sum();
        let energy_b: f32 = b.iter().map(|x| x * x).sum();
        let correlation = dot / (energy_a * energy_b).sqrt();

        assert!(correlation.abs() < 0.05, "correlation {correlation}");
    }

    #[test]
    fn zero_or_negative_duration_is_empty() {
        let mut noise = factory(4);
        assert!(noise.generate(0.0).is_empty());
        assert!(noise.crackle(-1.0).is_empty());
    }

    #[test]
    fn unbounded_duration_is_capped() {
        let noise = factory(8);
        let cap = noise.frames_for(MAX_NOISE_SECONDS);
        assert_eq!(cap, (MAX_NOISE_SECONDS * noise.sample_rate()) as usize);
        assert_eq!(noise.frames_for(f32::INFINITY), cap);
        assert_eq!(noise.frames_for(1e30), cap);
        assert_eq!(noise.frames_for(f32::NAN), 0);
    }

    #[test]
    fn crackle_fresh_draw_rate_tracks_probability() {
        let buffer = factory(5).crackle(20.0);

        let mut last = 0.0f32;
        let mut fresh = 0usize;
        for &sample in buffer.iter() {
            if sample != last * CRACKLE_DECAY {
                fresh += 1;
            }
            last = sample;
        }

        let rate = fresh as f32 / buffer.len() as f32;
        assert!(
            (rate - CRACKLE_PROBABILITY).abs() < 0.002,
            "fresh-draw rate {rate}"
        );
    }

    #[test]
    fn crackle_is_bounded_and_decays_between_pops() {
        let buffer = factory(6).crackle(1.0);
        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));

        // decay never grows a sample: any growth in magnitude is a fresh draw
        let decays = buffer
            .windows(2)
            .filter(|w| w[1] == w[0] * CRACKLE_DECAY)
            .count();
        assert!(decays > buffer.len() * 9 / 10);
    }

    #[test]
    fn render_dispatches_on_kind() {
        let mut noise = factory(7).with_crackle(0.0, 0.99);
        let crackle = noise.render(NoiseKind::Crackle, 0.01);
        assert!(crackle.iter().all(|&s| s == 0.0));

        let white = noise.render(NoiseKind::White, 0.01);
        assert!(white.iter().any(|&s| s != 0.0));
    }
}

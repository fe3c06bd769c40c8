use crate::dsp::noise::{clamp_noise_seconds, CRACKLE_DECAY, CRACKLE_PROBABILITY};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::PlaybackController`].
///
/// ```
/// use ambient_dsp::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_initial_volume(0.3);
/// assert_eq!(config.seed, Some(42));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Length in seconds of each looped noise buffer. The noise factory caps
    /// it at `MAX_NOISE_SECONDS` however it was set.
    pub noise_seconds: f32,
    pub crackle_probability: f32,
    pub crackle_decay: f32,
    /// Master volume before the first `set_volume`. Clamped to [0, 1].
    pub initial_volume: f32,
    /// Slots in the control → audio command ring.
    pub command_capacity: usize,
    /// Seed for every random source. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            noise_seconds: 2.0,
            crackle_probability: CRACKLE_PROBABILITY,
            crackle_decay: CRACKLE_DECAY,
            initial_volume: 0.5,
            command_capacity: 1024,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_noise_seconds(mut self, seconds: f32) -> Self {
        self.noise_seconds = clamp_noise_seconds(seconds);
        self
    }

    pub fn with_crackle(mut self, probability: f32, decay: f32) -> Self {
        self.crackle_probability = probability;
        self.crackle_decay = decay;
        self
    }

    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = volume;
        self
    }

    pub fn with_command_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity.max(2);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::noise::MAX_NOISE_SECONDS;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.noise_seconds, 2.0);
        assert_eq!(config.crackle_probability, 0.01);
        assert_eq!(config.crackle_decay, 0.99);
        assert_eq!(config.initial_volume, 0.5);
        assert_eq!(config.command_capacity, 1024);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builders_guard_degenerate_values() {
        let config = EngineConfig::default()
            .with_noise_seconds(-1.0)
            .with_command_capacity(0);
        assert_eq!(config.noise_seconds, 0.0);
        assert_eq!(config.command_capacity, 2);
    }

    #[test]
    fn noise_length_is_capped() {
        let config = EngineConfig::default().with_noise_seconds(f32::INFINITY);
        assert_eq!(config.noise_seconds, MAX_NOISE_SECONDS);

        let config = EngineConfig::default().with_noise_seconds(f32::NAN);
        assert_eq!(config.noise_seconds, 0.0);
    }
}

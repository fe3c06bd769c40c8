//! Transient voices layered over soundscape beds.
//!
//! Each voice is a one-shot node graph built at the moment it fires, with its
//! pitch drawn fresh from the caller's RNG. A voice goes silent on its own
//! once its envelope finishes; the engine disconnects it after
//! [`TransientKind::duration`].
//!
//! # Example
//!
//! ```
//! use ambient_dsp::voices::{self, TransientKind};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let cricket = TransientKind::Cricket.voice(&mut rng);
//! let chirp = voices::chirp_at(2_000.0);
//! ```

use std::{fmt, time::Duration};

use rand::Rng;

use crate::graph::{extensions::NodeExt, GraphNode};

mod chirp;
mod cricket;
mod thunder;

pub use chirp::{chirp_at, CHIRP_MAX_HZ, CHIRP_MIN_HZ, CHIRP_PEAK};
pub use cricket::{cricket_at, CRICKET_MAX_HZ, CRICKET_MIN_HZ, CRICKET_PEAK};
pub use thunder::{thunderclap_at, THUNDER_MAX_HZ, THUNDER_MIN_HZ, THUNDER_PEAK};

/// The one-shot sounds a soundscape can sprinkle over its bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransientKind {
    Chirp,
    Cricket,
    Thunderclap,
}

impl TransientKind {
    /// Build a fresh voice graph for this transient at a random pitch.
    pub fn voice<R: Rng + ?Sized>(self, rng: &mut R) -> Box<dyn GraphNode> {
        self.voice_at(self.pitch(rng))
    }

    pub fn voice_at(self, frequency: f32) -> Box<dyn GraphNode> {
        match self {
            TransientKind::Chirp => chirp_at(frequency).boxed(),
            TransientKind::Cricket => cricket_at(frequency).boxed(),
            TransientKind::Thunderclap => thunderclap_at(frequency).boxed(),
        }
    }

    /// Draw a pitch from this voice's range.
    pub fn pitch<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        let (low, high) = match self {
            TransientKind::Chirp => (CHIRP_MIN_HZ, CHIRP_MAX_HZ),
            TransientKind::Cricket => (CRICKET_MIN_HZ, CRICKET_MAX_HZ),
            TransientKind::Thunderclap => (THUNDER_MIN_HZ, THUNDER_MAX_HZ),
        };
        rng.random_range(low..high)
    }

    /// How long the voice stays connected before it is released.
    ///
    /// Attack plus release, rounded up to whole milliseconds.
    pub fn duration(self) -> Duration {
        match self {
            TransientKind::Chirp => Duration::from_millis(200),
            TransientKind::Cricket => Duration::from_millis(100),
            TransientKind::Thunderclap => Duration::from_millis(2_100),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransientKind::Chirp => "chirp",
            TransientKind::Cricket => "cricket",
            TransientKind::Thunderclap => "thunderclap",
        }
    }
}

impl fmt::Display for TransientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

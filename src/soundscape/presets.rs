use std::{fmt, str::FromStr};

use crate::{
    dsp::noise::NoiseKind,
    engine::scheduler::Recurrence,
    error::Error,
    soundscape::{
        chain::{filter_chain, FilterSpec},
        modulation::{lfo_for, LfoTarget},
    },
    voices::TransientKind,
};

/// The closed set of soundscapes the engine can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundType {
    Rain,
    Forest,
    Ocean,
    Fire,
    Wind,
    Cafe,
    Thunder,
    Night,
}

impl SoundType {
    pub const ALL: [SoundType; 8] = [
        SoundType::Rain,
        SoundType::Forest,
        SoundType::Ocean,
        SoundType::Fire,
        SoundType::Wind,
        SoundType::Cafe,
        SoundType::Thunder,
        SoundType::Night,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundType::Rain => "rain",
            SoundType::Forest => "forest",
            SoundType::Ocean => "ocean",
            SoundType::Fire => "fire",
            SoundType::Wind => "wind",
            SoundType::Cafe => "cafe",
            SoundType::Thunder => "thunder",
            SoundType::Night => "night",
        }
    }

    pub fn recipe(self) -> Recipe {
        recipe(self)
    }
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "café" {
            return Ok(SoundType::Cafe);
        }
        SoundType::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| Error::UnknownSound(s.to_string()))
    }
}

/// Looped noise bed at the bottom of every soundscape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BedSpec {
    pub source: NoiseKind,
    /// Linear gain applied after the filter chain, before the master gain.
    pub gain: f32,
}

/// A recurring one-shot layered over the bed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransientLayer {
    pub kind: TransientKind,
    pub every: Recurrence,
}

/// Everything needed to build one soundscape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recipe {
    pub sound: SoundType,
    pub bed: BedSpec,
    pub chain: &'static [FilterSpec],
    pub lfo: Option<LfoTarget>,
    pub layers: &'static [TransientLayer],
}

const CHIRPS: &[TransientLayer] = &[TransientLayer {
    kind: TransientKind::Chirp,
    every: Recurrence::from_millis(3_000, 8_000),
}];

const CRICKETS: &[TransientLayer] = &[TransientLayer {
    kind: TransientKind::Cricket,
    every: Recurrence::from_millis(500, 1_500),
}];

const CLAPS: &[TransientLayer] = &[TransientLayer {
    kind: TransientKind::Thunderclap,
    every: Recurrence::from_millis(8_000, 23_000),
}];

fn bed_for(sound: SoundType) -> BedSpec {
    let (source, gain) = match sound {
        SoundType::Rain => (NoiseKind::White, 0.8),
        SoundType::Forest => (NoiseKind::White, 0.6),
        SoundType::Ocean => (NoiseKind::White, 0.8),
        SoundType::Fire => (NoiseKind::Crackle, 1.0),
        SoundType::Wind => (NoiseKind::White, 0.9),
        SoundType::Cafe => (NoiseKind::White, 0.8),
        SoundType::Thunder => (NoiseKind::White, 0.8),
        SoundType::Night => (NoiseKind::White, 0.5),
    };
    BedSpec { source, gain }
}

fn layers_for(sound: SoundType) -> &'static [TransientLayer] {
    match sound {
        SoundType::Forest => CHIRPS,
        SoundType::Night => CRICKETS,
        SoundType::Thunder => CLAPS,
        _ => &[],
    }
}

/// Look up the recipe for a soundscape.
pub fn recipe(sound: SoundType) -> Recipe {
    Recipe {
        sound,
        bed: bed_for(sound),
        chain: filter_chain(sound),
        lfo: lfo_for(sound),
        layers: layers_for(sound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("Rain".parse::<SoundType>().unwrap(), SoundType::Rain);
        assert_eq!(" NIGHT ".parse::<SoundType>().unwrap(), SoundType::Night);
        assert_eq!("Café".parse::<SoundType>().unwrap(), SoundType::Cafe);
        let err = "snow".parse::<SoundType>();
        assert!(matches!(err, Err(Error::UnknownSound(name)) if name == "snow"));
    }

    #[test]
    fn display_round_trips() {
        for sound in SoundType::ALL {
            assert_eq!(sound.to_string().parse::<SoundType>().unwrap(), sound);
        }
    }

    #[test]
    fn only_fire_crackles() {
        for sound in SoundType::ALL {
            let expected = if sound == SoundType::Fire {
                NoiseKind::Crackle
            } else {
                NoiseKind::White
            };
            assert_eq!(recipe(sound).bed.source, expected, "{sound}");
        }
    }

    #[test]
    fn transient_layers() {
        let forest = recipe(SoundType::Forest);
        assert_eq!(forest.layers.len(), 1);
        assert_eq!(forest.layers[0].kind, TransientKind::Chirp);
        assert_eq!(
            forest.layers[0].every,
            Recurrence::from_millis(3_000, 8_000)
        );

        let night = recipe(SoundType::Night);
        assert_eq!(night.layers[0].kind, TransientKind::Cricket);
        assert_eq!(
            recipe(SoundType::Thunder).layers[0].every,
            Recurrence::from_millis(8_000, 23_000)
        );

        let bare = [
            SoundType::Rain,
            SoundType::Ocean,
            SoundType::Fire,
            SoundType::Wind,
            SoundType::Cafe,
        ];
        for sound in bare {
            assert!(recipe(sound).layers.is_empty(), "{sound}");
        }
    }

    #[test]
    fn thunder_is_rain_with_claps() {
        let rain = recipe(SoundType::Rain);
        let thunder = recipe(SoundType::Thunder);
        assert_eq!(rain.chain, thunder.chain);
        assert_eq!(rain.bed, thunder.bed);
    }

    #[test]
    fn bed_gains_are_unity_or_below() {
        for sound in SoundType::ALL {
            let gain = recipe(sound).bed.gain;
            assert!(gain > 0.0 && gain <= 1.0, "{sound}: {gain}");
        }
    }
}

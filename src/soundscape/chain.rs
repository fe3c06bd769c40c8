use crate::{
    dsp::filter::{FilterType, DEFAULT_Q},
    graph::{chain::Chain, filter::FilterNode, GraphNode},
    soundscape::{
        modulation::{attach_lfo, LfoTarget},
        presets::SoundType,
    },
};

/// One filter stage in a bed: response, cutoff and resonance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterType,
    pub cutoff_hz: f32,
    pub q: f32,
}

impl FilterSpec {
    pub const fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            kind: FilterType::LowPass,
            cutoff_hz,
            q: DEFAULT_Q,
        }
    }

    pub const fn highpass(cutoff_hz: f32) -> Self {
        Self {
            kind: FilterType::HighPass,
            cutoff_hz,
            q: DEFAULT_Q,
        }
    }

    pub const fn bandpass(cutoff_hz: f32) -> Self {
        Self {
            kind: FilterType::BandPass,
            cutoff_hz,
            q: DEFAULT_Q,
        }
    }

    pub const fn with_q(mut self, q: f32) -> Self {
        self.q = q;
        self
    }

    pub fn build(&self) -> FilterNode {
        FilterNode::new(self.kind, self.cutoff_hz, self.q)
    }
}

const RAIN: &[FilterSpec] = &[FilterSpec::lowpass(400.0), FilterSpec::highpass(40.0)];
const FOREST: &[FilterSpec] = &[FilterSpec::lowpass(200.0).with_q(0.5)];
const OCEAN: &[FilterSpec] = &[FilterSpec::lowpass(500.0)];
const FIRE: &[FilterSpec] = &[FilterSpec::highpass(200.0), FilterSpec::lowpass(2_000.0)];
const WIND: &[FilterSpec] = &[FilterSpec::bandpass(300.0).with_q(0.5)];
const CAFE: &[FilterSpec] = &[FilterSpec::lowpass(300.0).with_q(0.3)];
const NIGHT: &[FilterSpec] = &[FilterSpec::lowpass(150.0)];

/// Ordered filter stages for a sound's bed, first stage nearest the source.
pub fn filter_chain(sound: SoundType) -> &'static [FilterSpec] {
    match sound {
        SoundType::Rain | SoundType::Thunder => RAIN,
        SoundType::Forest => FOREST,
        SoundType::Ocean => OCEAN,
        SoundType::Fire => FIRE,
        SoundType::Wind => WIND,
        SoundType::Cafe => CAFE,
        SoundType::Night => NIGHT,
    }
}

/// Wire `source → spec[0] → … → spec[n-1]`, with `lfo` sweeping the cutoff of
/// the stage it targets.
///
/// A target past the end of `specs` is ignored.
pub fn build_chain(
    source: impl GraphNode + 'static,
    specs: &[FilterSpec],
    lfo: Option<LfoTarget>,
) -> Chain {
    let mut chain = Chain::new(source);
    for (index, spec) in specs.iter().enumerate() {
        match lfo {
            Some(target) if target.stage == index => {
                chain.push(attach_lfo(spec.build(), target.spec));
            }
            _ => chain.push(spec.build()),
        }
    }
    chain
}

//! Thunderclap voice.
//!
//! Distant thunder is mostly sub-bass: a low sawtooth gives it a rough,
//! rolling texture and a steep lowpass takes away anything that would
//! sound like a synth.
//!
//! # How It Works
//!
//! 1. Sawtooth between 40 and 70 Hz, picked per clap
//! 2. Lowpass at 100 Hz keeps only the rumble
//! 3. Slow 100 ms swell to 0.3, then a 2 s exponential die-away
//!
//! # Variations
//!
//! - Shorter release = a closer, sharper crack
//! - Raise the lowpass = more bite in the rumble

use crate::{
    dsp::envelope::ReleaseCurve,
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
    },
};

pub const THUNDER_MIN_HZ: f32 = 40.0;
pub const THUNDER_MAX_HZ: f32 = 70.0;
pub const THUNDER_CUTOFF_HZ: f32 = 100.0;
pub const THUNDER_PEAK: f32 = 0.3;
pub const THUNDER_ATTACK: f32 = 0.1;
pub const THUNDER_RELEASE: f32 = 2.0;

pub fn thunderclap_at(frequency: f32) -> impl GraphNode {
    OscNode::sawtooth(frequency)
        .through(FilterNode::lowpass(THUNDER_CUTOFF_HZ))
        .amplify(EnvNode::one_shot(
            THUNDER_PEAK,
            THUNDER_ATTACK,
            THUNDER_RELEASE,
            ReleaseCurve::Exponential,
        ))
}

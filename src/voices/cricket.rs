//! Cricket voice.
//!
//! A very short, very quiet tick between 4 and 5 kHz. Fired every half
//! second or so it reads as a field of crickets rather than one insect.

use crate::{
    dsp::envelope::ReleaseCurve,
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode},
};

pub const CRICKET_MIN_HZ: f32 = 4_000.0;
pub const CRICKET_MAX_HZ: f32 = 5_000.0;
pub const CRICKET_PEAK: f32 = 0.02;
pub const CRICKET_ATTACK: f32 = 0.01;
pub const CRICKET_RELEASE: f32 = 0.04;

pub fn cricket_at(frequency: f32) -> impl GraphNode {
    OscNode::sine(frequency).amplify(EnvNode::one_shot(
        CRICKET_PEAK,
        CRICKET_ATTACK,
        CRICKET_RELEASE,
        ReleaseCurve::Linear,
    ))
}

//! Bird chirp voice.
//!
//! A short sine blip high in the treble, the sort of call that carries
//! across a forest clearing.
//!
//! # How It Works
//!
//! 1. Sine oscillator, pitch picked per chirp between 1.5 and 2.5 kHz
//! 2. 50 ms attack up to a quiet peak, so it sits behind the bed
//! 3. 150 ms linear release back to silence

use crate::{
    dsp::envelope::ReleaseCurve,
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode},
};

pub const CHIRP_MIN_HZ: f32 = 1_500.0;
pub const CHIRP_MAX_HZ: f32 = 2_500.0;
pub const CHIRP_PEAK: f32 = 0.05;
pub const CHIRP_ATTACK: f32 = 0.05;
pub const CHIRP_RELEASE: f32 = 0.15;

/// Create a chirp at a fixed pitch.
pub fn chirp_at(frequency: f32) -> impl GraphNode {
    OscNode::sine(frequency).amplify(EnvNode::one_shot(
        CHIRP_PEAK,
        CHIRP_ATTACK,
        CHIRP_RELEASE,
        ReleaseCurve::Linear,
    ))
}

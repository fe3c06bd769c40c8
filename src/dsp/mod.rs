//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Everything here is allocation-free once constructed, except `noise`, whose
//! buffers are rendered on the control thread before a bed is connected.

/// One-shot attack/release envelope for transients.
pub mod envelope;
/// State-variable filter with low/high/band-pass responses.
pub mod filter;
/// Block-rate modulation math.
pub mod modulate;
/// White and crackle noise buffers.
pub mod noise;
/// Phase-accumulator oscillators.
pub mod oscillator;

pub use envelope::EnvelopeState;
pub use noise::{NoiseBuffer, NoiseFactory, NoiseKind};

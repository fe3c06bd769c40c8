//! Composable building blocks for soundscape graphs.
//!
//! Graph nodes wrap the DSP primitives in `dsp/` with block rendering and
//! modulation. `extensions` adds the fluent helpers the voices and beds are
//! written with.

/// Signal × control multiplication, plus fixed gain.
pub mod amplify;
/// Runtime-length serial filter chains.
pub mod chain;
/// One-shot envelope node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, etc.).
pub mod extensions;
/// State-variable filter node.
pub mod filter;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Looping playback of pre-rendered noise.
pub mod noise;
/// Audio-band oscillators.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};

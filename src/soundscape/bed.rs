use tracing::debug;

use crate::{
    dsp::noise::NoiseFactory,
    graph::{extensions::NodeExt, noise::NoiseLoopNode, GraphNode},
    soundscape::{chain::build_chain, presets::Recipe},
};

/// Build the continuous part of a soundscape: looped noise, filter chain,
/// optional LFO, bed gain.
///
/// The noise buffer is rendered here, on the control thread, and owned by the
/// returned graph.
pub fn build_bed(
    recipe: &Recipe,
    noise: &mut NoiseFactory,
    noise_seconds: f32,
) -> Box<dyn GraphNode> {
    let buffer = noise.render(recipe.bed.source, noise_seconds);
    debug!(sound = %recipe.sound, frames = buffer.len(), "rendered bed noise");

    build_chain(NoiseLoopNode::new(buffer), recipe.chain, recipe.lfo)
        .gain(recipe.bed.gain)
        .boxed()
}

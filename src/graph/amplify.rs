use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a control node, sample by sample.
///
/// With an `EnvNode` as modulator this is a VCA: the tone is only audible
/// while the envelope is open.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.signal.render_block(chunk, ctx);

            let frames = &mut self.temp_buffer[..chunk.len()];
            frames.fill(0.0);
            self.modulator.render_block(frames, ctx);

            for (o, m) in chunk.iter_mut().zip(frames.iter()) {
                *o *= *m;
            }
        }
    }

    // the modulator gates the output, so it alone decides
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

/// Fixed linear gain.
pub struct Gain<N> {
    signal: N,
    gain: f32,
}

impl<N> Gain<N> {
    pub fn new(signal: N, gain: f32) -> Self {
        Self { signal, gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);
        for sample in out.iter_mut() {
            *sample *= self.gain;
        }
    }

    fn is_active(&self) -> bool {
        self.signal.is_active()
    }
}

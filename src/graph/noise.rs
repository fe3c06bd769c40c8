use crate::{
    dsp::noise::NoiseBuffer,
    graph::node::{GraphNode, RenderCtx},
};

/// Loops a pre-rendered noise buffer forever.
///
/// The buffer is shared, so building the node never copies samples. An empty
/// buffer renders silence.
pub struct NoiseLoopNode {
    buffer: NoiseBuffer,
    position: usize,
}

impl NoiseLoopNode {
    pub fn new(buffer: NoiseBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn buffer(&self) -> &NoiseBuffer {
        &self.buffer
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl GraphNode for NoiseLoopNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let len = self.buffer.len();
        if len == 0 {
            out.fill(0.0);
            return;
        }

        let mut written = 0;
        while written < out.len() {
            let take = (len - self.position).min(out.len() - written);
            let end = self.position + take;
            out[written..written + take].copy_from_slice(&self.buffer[self.position..end]);
            written += take;
            self.position = (self.position + take) % len;
        }
    }
}

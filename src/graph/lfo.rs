use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

A sub-audible oscillator whose output is never heard directly: it is fed to
another node's parameter through `Modulate`. Output is bipolar, [-1, +1].

  0.1 Hz    one cycle every 10 s   ocean "breathing"
  0.05 Hz   one cycle every 20 s   wind gusts swelling and fading

The LFO has no lifetime of its own. It lives inside the `Modulate` node that
owns the filter it drives, so it starts with the bed and is torn down with it.
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}

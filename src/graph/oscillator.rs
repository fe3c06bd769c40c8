use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

Soundscape transients are short tones at a fixed pitch chosen when they fire:

  Sine      pure whistle. A bird chirp at 1.5-2.5 kHz, a cricket at 4-5 kHz.
  Sawtooth  every harmonic. Pitched down to 40-70 Hz and lowpassed at 100 Hz
            it becomes the rolling body of a thunderclap.

The beds themselves never use an oscillator; they loop noise buffers (see
`graph/noise.rs`).

  let chirp = OscNode::sine(2_000.0)
      .amplify(EnvNode::one_shot(0.05, 0.05, 0.15, ReleaseCurve::Linear));
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl OscNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn sawtooth(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sawtooth(),
            frequency,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn sine_starts_at_zero_phase() {
        let ctx = RenderCtx::new(48_000.0);
        let mut osc = OscNode::sine(2_000.0);

        let mut buffer = vec![0.0f32; 128];
        osc.render_block(&mut buffer, &ctx);

        let n = 7;
        let expected = (TAU * 2_000.0 * n as f32 / 48_000.0).sin();
        assert!((buffer[n] - expected).abs() < 1e-4);
    }
}

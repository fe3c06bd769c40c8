use crate::{
    dsp::modulate::{apply_modulation, block_average},
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Modulate Node
=============

Couples a control source to one parameter of another node. Once per block the
LFO is rendered into scratch space, averaged, scaled by `depth` and added to
the parameter's base value; then the target renders with the new value.

    value = base + avg(lfo[block]) × depth

  // wind: band centre swells ±150 Hz around 300 Hz every 20 s
  let gusts = FilterNode::bandpass(300.0)
      .with_q(0.5)
      .modulate(LfoNode::sine(0.05), FilterParam::Cutoff, 150.0);

The modulator is owned by value. Dropping the `Modulate` drops the LFO with
it, which is what ties an LFO's lifetime to the sound it shapes.

See `dsp/modulate.rs` for why block-rate is enough at these speeds.
*/

pub struct Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    source: S,
    lfo: L,
    param: S::Param,
    depth: f32,
    lfo_buffer: Vec<f32>,
}

impl<S, L> Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    pub fn new(source: S, lfo: L, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            lfo,
            param,
            depth,
            lfo_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, L> GraphNode for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let control = &mut self.lfo_buffer[..chunk.len()];
            self.lfo.render_block(control, ctx);

            let base = self.source.get_param(self.param);
            let target = apply_modulation(base, block_average(control), self.depth);
            self.source.apply_modulation(self.param, base, target - base);

            self.source.render_block(chunk, ctx);
        }
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

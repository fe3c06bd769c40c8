use crate::{
    dsp::envelope::{Envelope, ReleaseCurve},
    graph::node::{GraphNode, RenderCtx},
};

/// One-shot envelope as a control signal, usually fed to `.amplify()`.
///
/// The node is armed on construction: transients are built at the moment they
/// fire, so the attack starts with the first rendered block.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn one_shot(peak: f32, attack: f32, release: f32, curve: ReleaseCurve) -> Self {
        let mut env = Envelope::one_shot(peak, attack, release, curve);
        env.trigger();
        Self { env }
    }

    pub fn level(&self) -> f32 {
        self.env.level()
    }

    pub fn duration(&self) -> f32 {
        self.env.duration()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Renders the source into the buffer, then lets the effect process that buffer
in place:

  [Source] ──→ [Effect] ──→ output

Used where both ends are known at compile time, e.g. the thunderclap voice:

  OscNode::sawtooth(55.0).through(FilterNode::lowpass(100.0))

Filter chains whose length depends on a recipe use `Chain` instead.
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active() || self.filter.is_active()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{
        extensions::NodeExt,
        filter::FilterNode,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
    };

    #[test]
    fn renders_source_then_filter() {
        let ctx = RenderCtx::new(48_000.0);

        let mut dry = OscNode::sine(4_000.0);
        let mut dry_buffer = vec![0.0; 2048];
        dry.render_block(&mut dry_buffer, &ctx);

        let mut wet = OscNode::sine(4_000.0).through(FilterNode::lowpass(100.0));
        let mut wet_buffer = vec![0.0; 2048];
        wet.render_block(&mut wet_buffer, &ctx);

        let energy = |b: &[f32]| b.iter().map(|s| s * s).sum::<f32>();
        assert!(energy(&wet_buffer) < energy(&dry_buffer) * 0.01);
    }
}

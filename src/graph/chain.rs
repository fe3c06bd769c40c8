use crate::graph::node::{GraphNode, RenderCtx};

/// A source followed by any number of in-place stages, decided at runtime.
///
/// `Through` generalised to a list: the source renders into the buffer and each
/// stage processes it in order, so `source → stage₁ → … → stageₙ → out`.
pub struct Chain {
    source: Box<dyn GraphNode>,
    stages: Vec<Box<dyn GraphNode>>,
}

impl Chain {
    pub fn new(source: impl GraphNode + 'static) -> Self {
        Self {
            source: Box::new(source),
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, stage: impl GraphNode + 'static) {
        self.stages.push(Box::new(stage));
    }

    pub fn then(mut self, stage: impl GraphNode + 'static) -> Self {
        self.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl GraphNode for Chain {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        for stage in self.stages.iter_mut() {
            stage.render_block(out, ctx);
        }
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

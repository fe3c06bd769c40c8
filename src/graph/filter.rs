use crate::{
    dsp::filter::{FilterType, SVFilter},
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/*
Filter Node
===========

Every soundscape bed is noise pushed through one or more of these. The
filter is what turns hiss into a place:

  lowpass 400 Hz, Q 1     soft steady rain on a roof
  lowpass 200 Hz, Q 0.5   distant wind through trees
  lowpass 150 Hz          the low hush under a night scene
  bandpass 300 Hz, Q 0.5  wind whistling past an edge
  highpass 200 Hz         strips the thump from fire crackle

Cutoff and Q are both modulatable. Modulation writes `base + offset` into the
running filter but remembers `base`, so an LFO always swings around the
recipe's centre rather than drifting.

  // the ocean bed: surf cutoff breathes ±200 Hz around 500 Hz
  let surf = FilterNode::lowpass(500.0)
      .modulate(LfoNode::sine(0.1), FilterParam::Cutoff, 200.0);
*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterParam {
    Cutoff,
    Q,
}

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_q: f32,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, q: f32) -> Self {
        let filter = SVFilter::new(filter_type, cutoff_hz, q);
        let base_q = filter.q;

        FilterNode {
            filter,
            base_cutoff: cutoff_hz,
            base_q,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::from_filter(SVFilter::lowpass(cutoff_hz))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::from_filter(SVFilter::highpass(cutoff_hz))
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::from_filter(SVFilter::bandpass(cutoff_hz))
    }

    fn from_filter(filter: SVFilter) -> Self {
        FilterNode {
            base_cutoff: filter.cutoff_hz,
            base_q: filter.q,
            filter,
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.filter.set_q(q);
        self.base_q = self.filter.q;
        self
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter.filter_type()
    }

    /// Cutoff currently in use, including any modulation offset.
    pub fn current_cutoff(&self) -> f32 {
        self.filter.cutoff_hz
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Q => self.base_q,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                self.base_cutoff = base;
                self.filter.set_cutoff(value.clamp(20.0, 20_000.0));
            }
            FilterParam::Q => {
                self.base_q = base;
                self.filter.set_q(value.clamp(0.05, 20.0));
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}

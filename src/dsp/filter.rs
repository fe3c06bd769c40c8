use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
| type      | passes          | rejects         | ambient use                   |
| --------- | --------------- | --------------- | ----------------------------- |
| low-pass  | below cutoff    | above cutoff    | rain body, surf, room murmur  |
| high-pass | above cutoff    | below cutoff    | rumble removal, fire crackle  |
| band-pass | around cutoff   | both sides      | wind whistle                  |

The TPT state-variable filter computes all responses at once; `filter_type`
only picks which one is written back. Damping is `k = 1 / Q`, so Q = 0.5 is a
critically damped slope and Q > 0.707 starts to ring at the cutoff.
*/

/// Lowest Q accepted; below this the damping term explodes.
pub const MIN_Q: f32 = 0.05;
/// Q used when a recipe does not name one.
pub const DEFAULT_Q: f32 = 1.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,

    pub cutoff_hz: f32,
    pub q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: q.max(MIN_Q),
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, DEFAULT_Q)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, DEFAULT_Q)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz, DEFAULT_Q)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Prewarped integrator gain. Cutoff is held under Nyquist so `tan` stays finite.
    #[inline]
    fn compute_g(&self, ctx: &RenderCtx) -> f32 {
        let cutoff = self.cutoff_hz.clamp(1.0, ctx.sample_rate * 0.49);
        (PI * cutoff / ctx.sample_rate).tan()
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let g = self.compute_g(ctx);
        let k = 1.0 / self.q;

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.filter_type {
                FilterType::LowPass => outputs.lowpass,
                FilterType::HighPass => outputs.highpass,
                FilterType::BandPass => outputs.bandpass,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(MIN_Q);
    }
}

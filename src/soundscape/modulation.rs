use crate::{
    graph::{
        extensions::NodeExt,
        filter::{FilterNode, FilterParam},
        lfo::LfoNode,
        modulate::Modulate,
    },
    soundscape::presets::SoundType,
};

/*
Slow cutoff movement for beds that should breathe:

  ocean   0.1 Hz, ±200 Hz   a wave every ten seconds
  wind    0.05 Hz, ±150 Hz  a gust swelling over twenty

The LFO is moved into the `Modulate` wrapper that owns the filter, so it
starts when the bed starts and is dropped with it.
*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfoSpec {
    pub rate_hz: f32,
    pub depth_hz: f32,
}

/// An LFO aimed at the cutoff of one stage of a bed's filter chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfoTarget {
    pub stage: usize,
    pub spec: LfoSpec,
}

pub fn lfo_for(sound: SoundType) -> Option<LfoTarget> {
    let spec = match sound {
        SoundType::Ocean => LfoSpec {
            rate_hz: 0.1,
            depth_hz: 200.0,
        },
        SoundType::Wind => LfoSpec {
            rate_hz: 0.05,
            depth_hz: 150.0,
        },
        _ => return None,
    };
    Some(LfoTarget { stage: 0, spec })
}

/// Sum a sine LFO scaled by `depth_hz` into the filter's cutoff.
pub fn attach_lfo(filter: FilterNode, spec: LfoSpec) -> Modulate<FilterNode, LfoNode> {
    let lfo = LfoNode::sine(spec.rate_hz);
    filter.modulate(lfo, FilterParam::Cutoff, spec.depth_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::Modulatable;

    #[test]
    fn only_ocean_and_wind_move() {
        for sound in SoundType::ALL {
            let has_lfo = lfo_for(sound).is_some();
            let breathes = matches!(sound, SoundType::Ocean | SoundType::Wind);
            assert_eq!(has_lfo, breathes, "{sound}");
        }
    }

    #[test]
    fn attached_lfo_keeps_base_cutoff() {
        let spec = lfo_for(SoundType::Ocean).map(|t| t.spec).unwrap();
        let node = attach_lfo(FilterNode::lowpass(500.0), spec);
        assert_eq!(node.depth(), 200.0);
        assert_eq!(node.source().get_param(FilterParam::Cutoff), 500.0);
    }
}

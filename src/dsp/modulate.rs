//! Block-rate parameter modulation.

/*
Slow Parameter Modulation
=========================

Ambient beds move far slower than any musical vibrato: the ocean "breathes"
at 0.1 Hz (one swell every ten seconds) and wind gusts swell at 0.05 Hz. At
those rates one control value per render block is indistinguishable from
per-sample updates, and it keeps filter coefficient work out of the inner
loop.

    modulated = base + lfo × depth

  base     centre value of the parameter (e.g. 500 Hz surf cutoff)
  lfo      bipolar control signal in [-1, +1], averaged over the block
  depth    swing either side of the centre, in the parameter's own units

Ocean: base 500 Hz, depth 200 Hz  →  cutoff wanders between 300 and 700 Hz.
Wind:  base 300 Hz, depth 150 Hz  →  band centre wanders between 150 and 450 Hz.

The target node clamps the result into its legal range; recipes are chosen so
`base - depth` stays positive and clamping never flattens the sweep.
*/

/// Modulated value for one block.
#[inline]
pub fn apply_modulation(base: f32, modulator: f32, depth: f32) -> f32 {
    base + modulator * depth
}

/// Mean of a block of control samples; empty blocks contribute nothing.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

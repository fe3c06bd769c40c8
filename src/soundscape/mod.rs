//! Soundscape recipes: which noise, which filters, which LFO, which transients.

pub mod bed;
pub mod chain;
pub mod modulation;
pub mod presets;

pub use bed::build_bed;
pub use presets::{recipe, Recipe, SoundType, TransientLayer};

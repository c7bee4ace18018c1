//! Individual anti-spoof sub-checks.
//!
//! Each check scores one physical cue in [0, 1] and returns `None` when
//! its input is degenerate for that cue; the detector substitutes a
//! neutral score in that case.

mod color;
mod frequency;
mod periodicity;
mod reflection;
mod texture;

pub use color::color_score;
pub use frequency::frequency_score;
pub use periodicity::periodicity_score;
pub use reflection::reflection_score;
pub use texture::texture_score;

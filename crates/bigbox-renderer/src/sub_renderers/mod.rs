//! Sub-renderers drawn in the single main pass.
//!
//! - [`shadow::ShadowRenderer`]: soft blended ellipse under the box
//! - [`cuboid::CuboidRenderer`]: the textured, lit box

pub mod cuboid;
pub mod shadow;

pub use cuboid::{CuboidRenderer, CuboidUniform};
pub use shadow::{ShadowRenderer, ShadowUniform};


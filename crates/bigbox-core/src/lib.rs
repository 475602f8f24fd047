//! BigBox Core
//!
//! CPU-side logic for rendering a textured "big box" cuboid: face images,
//! box proportions, the texture atlas, mesh generation, the lighting and
//! shadow models, and rotation/zoom interaction.
//!
//! # Module Structure
//!
//! ```text
//! bigbox-core/
//! ├── face.rs          # Face enum, FaceImage
//! ├── face_set.rs      # Full / Equatorial face sets
//! ├── dimensions.rs    # CuboidExtents from face aspect ratios
//! ├── atlas/           # 3x2 atlas packing, layout file, debug overlay
//! ├── geometry.rs      # 24-vertex cuboid mesh, model matrix
//! ├── shading.rs       # CPU reference of the lighting model
//! ├── shadow.rs        # NDC-footprint shadow ellipse and fade
//! ├── params.rs        # Gloss/shadow presets, ParameterCell
//! ├── interaction.rs   # Angles/zoom state machine, gesture queue
//! └── input.rs         # Pointer events to gestures
//! ```

pub mod atlas;
pub mod constants;
pub mod dimensions;
pub mod face;
pub mod face_set;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod params;
pub mod shading;
pub mod shadow;

pub use atlas::{
    AtlasBitmap, AtlasBuilder, AtlasError, AtlasLayout, AtlasRegion, FacePlacement, LayoutError,
};
pub use dimensions::{CuboidExtents, DimensionError};
pub use face::{Face, FaceImage, FaceImageError};
pub use face_set::{FaceSet, ResolvedFaces};
pub use geometry::{CuboidMesh, CuboidVertex, model_matrix};
pub use input::{GestureRecognizer, PointerEvent, Recognized};
pub use interaction::{
    GestureEvent, GesturePhase, GestureSender, InteractionConfig, InteractionController,
    InteractionState,
};
pub use params::{GlossLevel, ParameterCell, ShadingParameters, ShadowFade, ShadowOpacity};
pub use shadow::{ShadowEllipse, project_shadow, shadow_alpha};

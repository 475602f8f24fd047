//! BigBox Renderer
//!
//! WGPU rendering of a textured, lit cuboid with a soft drop shadow.
//!
//! # Architecture
//!
//! - [`renderer::BoxRenderer`] - Lifecycle state machine driven by the host's
//!   surface events; draws one frame per [`render`](renderer::BoxRenderer::render)
//! - [`sub_renderers`] - The shadow and cuboid pipelines
//! - [`camera::ViewTransforms`] - View/projection cache keyed on zoom
//! - [`offscreen::OffscreenTarget`] - Headless surface for PNG output and tests
//!
//! # Module Structure
//!
//! ```text
//! bigbox-renderer/
//! ├── renderer/        # BoxRenderer, GPU resources, main pass
//! ├── sub_renderers/   # Shadow and cuboid renderers
//! ├── shaders/         # WGSL sources
//! ├── camera.rs        # Camera and view cache
//! ├── config.rs        # RON configuration
//! ├── offscreen.rs     # Headless target and readback
//! ├── pipeline.rs      # Pipeline builder
//! ├── upload.rs        # Atlas-uploaded signal
//! └── vertex.rs        # Vertex layouts
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod offscreen;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod upload;
pub mod vertex;

pub use camera::{Camera, ViewTransforms};
pub use config::{AtlasConfig, CameraConfig, ConfigError, RendererConfig, ViewportConfig};
pub use error::RenderError;
pub use offscreen::OffscreenTarget;
pub use renderer::{BoxRenderer, LifecyclePhase};
pub use sub_renderers::{CuboidRenderer, CuboidUniform, ShadowRenderer, ShadowUniform};
pub use upload::{UploadSignal, UploadWatch};
pub use vertex::{ShadowVertex, VertexLayout};

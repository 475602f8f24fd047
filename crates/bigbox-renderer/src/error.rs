//! Renderer errors

use bigbox_core::AtlasError;

/// Errors raised while creating or driving the renderer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// No GPU adapter matched the request
    #[error("No suitable GPU adapter: {0}")]
    NoAdapter(String),
    /// The adapter refused to create a device
    #[error("Device request failed: {0}")]
    DeviceRequest(String),
    /// Shader compilation or pipeline validation failed
    #[error("Shader/pipeline validation failed: {0}")]
    Shader(String),
    /// Atlas is larger than the device's 2D texture limit
    #[error("Atlas {width}x{height} exceeds the device texture limit of {max}")]
    AtlasTooLarge {
        /// Atlas width in pixels
        width: u32,
        /// Atlas height in pixels
        height: u32,
        /// Device `max_texture_dimension_2d`
        max: u32,
    },
    /// The operation needs a live surface
    #[error("Renderer is not ready (no surface)")]
    NotReady,
    /// The renderer's GPU resources have been freed
    #[error("Renderer has been released")]
    Released,
    /// Atlas could not be built
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    /// GPU readback failed
    #[error("Readback failed: {0}")]
    Readback(String),
}

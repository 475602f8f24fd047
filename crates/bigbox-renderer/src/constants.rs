//! Rendering constants
//!
//! Defaults for the camera, texture formats and the lighting rig. Values
//! that are user-tunable are also exposed through [`crate::config`].

/// Camera defaults
pub mod camera {
    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 35.0;
    /// Near clipping plane
    pub const NEAR_PLANE: f32 = 0.1;
    /// Far clipping plane
    pub const FAR_PLANE: f32 = 100.0;
    /// Camera distance from the origin at zoom 1.0
    pub const BASE_DISTANCE: f32 = 8.0;
}

/// Texture formats
pub mod texture {
    /// Depth buffer format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Atlas texture format. Lighting runs on the stored bytes, no sRGB decode.
    pub const ATLAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    /// Offscreen color target format, matching the atlas so output bytes are
    /// the lighting result unconverted
    pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
}

/// Lighting rig
pub mod lighting {
    /// Light color (RGB)
    pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
}

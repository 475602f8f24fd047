//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized to and loaded from RON files. Every section carries
//! `#[serde(default)]`, so a file only needs the fields it overrides.

use std::path::Path;

use bigbox_core::{InteractionConfig, ShadingParameters};
use serde::{Deserialize, Serialize};

use crate::constants::camera as cam;

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA). Transparent so the host UI shows through.
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl ViewportConfig {
    /// Clear color as a wgpu color
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Camera distance at zoom 1.0
    pub base_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: cam::FOV_DEGREES,
            near_plane: cam::NEAR_PLANE,
            far_plane: cam::FAR_PLANE,
            base_distance: cam::BASE_DISTANCE,
        }
    }
}

/// Atlas build options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AtlasConfig {
    /// Draw face borders and labels into the atlas
    pub debug_overlay: bool,
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Drag sensitivity and initial orientation
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Initial gloss/shadow parameters
    #[serde(default)]
    pub shading: ShadingParameters,
    /// Atlas options
    #[serde(default)]
    pub atlas: AtlasConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded renderer config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Configuration file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(String),
    /// Config could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// File contents are not a valid config
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

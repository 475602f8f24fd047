//! Atlas layout description (UV regions, face sizes, box proportions)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dimensions::CuboidExtents;
use crate::face::Face;

/// Normalized texture sub-rectangle of one face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasRegion {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl AtlasRegion {
    /// The whole texture.
    pub const FULL: AtlasRegion = AtlasRegion {
        u0: 0.0,
        v0: 0.0,
        u1: 1.0,
        v1: 1.0,
    };

    /// Region of a `w`×`h` pixel rectangle at (`x`, `y`) in an atlas of
    /// `atlas_width`×`atlas_height` pixels.
    pub fn from_pixels(
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        atlas_width: u32,
        atlas_height: u32,
    ) -> Self {
        let aw = atlas_width as f32;
        let ah = atlas_height as f32;
        Self {
            u0: x as f32 / aw,
            v0: y as f32 / ah,
            u1: (x + w) as f32 / aw,
            v1: (y + h) as f32 / ah,
        }
    }

    pub fn width(&self) -> f32 {
        self.u1 - self.u0
    }

    pub fn height(&self) -> f32 {
        self.v1 - self.v0
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Whether two regions share any interior area (touching edges do not count).
    pub fn overlaps(&self, other: &AtlasRegion) -> bool {
        self.u0 < other.u1 && other.u0 < self.u1 && self.v0 < other.v1 && other.v0 < self.v1
    }

    /// Corner UVs in vertex order: top-left, top-right, bottom-left, bottom-right.
    pub fn corner_uvs(&self) -> [[f32; 2]; 4] {
        [
            [self.u0, self.v0],
            [self.u1, self.v0],
            [self.u0, self.v1],
            [self.u1, self.v1],
        ]
    }
}

/// Where one face landed in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePlacement {
    pub face: Face,
    pub region: AtlasRegion,
    /// Target size in pixels (before cell padding).
    pub size: (u32, u32),
}

/// Pixel-free description of a packed atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    /// One entry per face, canonical order.
    pub faces: Vec<FacePlacement>,
    pub extents: CuboidExtents,
    pub supports_full_x_rotation: bool,
}

impl AtlasLayout {
    /// Region for `face`, or the full texture if the layout lacks it.
    pub fn region(&self, face: Face) -> AtlasRegion {
        self.placement(face)
            .map(|p| p.region)
            .unwrap_or(AtlasRegion::FULL)
    }

    /// Target pixel size for `face`.
    pub fn size(&self, face: Face) -> (u32, u32) {
        self.placement(face).map(|p| p.size).unwrap_or((0, 0))
    }

    fn placement(&self, face: Face) -> Option<&FacePlacement> {
        self.faces
            .get(face.index())
            .filter(|p| p.face == face)
            .or_else(|| self.faces.iter().find(|p| p.face == face))
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, LayoutError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| LayoutError::Serialize(e.to_string()))
    }

    /// Save layout to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| LayoutError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load layout from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| LayoutError::Deserialize(e.to_string()))
    }
}

/// Layout file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

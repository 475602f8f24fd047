//! Cuboid faces and the decoded images that texture them

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::constants::FILLER_COLOR;

/// One of the six logical sides of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    /// Canonical order used by the atlas grid, the geometry buffers and
    /// every six-element face list.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Position of this face in [`Face::ALL`].
    pub fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Top => 4,
            Face::Bottom => 5,
        }
    }

    /// One-letter label drawn by the debug overlay.
    ///
    /// Bottom uses `D` (down) so that it does not collide with Back.
    pub fn label(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Top => 'T',
            Face::Bottom => 'D',
        }
    }

    /// Outward unit normal in model space.
    pub fn normal(self) -> [f32; 3] {
        match self {
            Face::Front => [0.0, 0.0, 1.0],
            Face::Back => [0.0, 0.0, -1.0],
            Face::Left => [-1.0, 0.0, 0.0],
            Face::Right => [1.0, 0.0, 0.0],
            Face::Top => [0.0, 1.0, 0.0],
            Face::Bottom => [0.0, -1.0, 0.0],
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// A decoded RGBA raster for one face.
///
/// Width and height are always strictly positive.
#[derive(Debug, Clone)]
pub struct FaceImage {
    pixels: RgbaImage,
}

impl FaceImage {
    /// Wrap a decoded image, rejecting empty rasters.
    pub fn new(pixels: RgbaImage) -> Result<Self, FaceImageError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(FaceImageError::Empty {
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        Ok(Self { pixels })
    }

    /// Solid 1×1 opaque black image standing in for an absent face.
    pub fn filler() -> Self {
        Self {
            pixels: RgbaImage::from_pixel(1, 1, image::Rgba(FILLER_COLOR)),
        }
    }

    /// Single-color image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, FaceImageError> {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    /// Decode an encoded image (PNG/JPEG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, FaceImageError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| FaceImageError::Decode(e.to_string()))?;
        Self::new(decoded.into_rgba8())
    }

    /// Load and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FaceImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FaceImageError::Io(format!("{}: {}", path.display(), e)))?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

/// Face image errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FaceImageError {
    #[error("Face image must have positive dimensions, got {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Decode error: {0}")]
    Decode(String),
}

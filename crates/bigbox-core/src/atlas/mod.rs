//! Texture atlas packing
//!
//! Six face images are packed into a single bitmap laid out as a fixed
//! 3-column × 2-row grid:
//!
//! ```text
//! ┌───────────┬───────────┬───────────┐
//! │ Front     │ Back      │ Left      │
//! ├───────────┼───────────┼───────────┤
//! │ Right     │ Top       │ Bottom    │
//! └───────────┴───────────┴───────────┘
//! ```
//!
//! Faces are resampled to sizes proportional to the box's physical
//! proportions, not to their source photo resolution. Each column is as wide
//! as its widest face and each row as tall as its tallest face, so cells tile
//! the atlas exactly; smaller faces leave unused padding in their cell.

mod layout;
mod overlay;

pub use layout::{AtlasLayout, AtlasRegion, FacePlacement, LayoutError};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::constants::{ATLAS_COLUMNS, ATLAS_ROWS, FACE_COUNT};
use crate::dimensions::{CuboidExtents, DimensionError};
use crate::face::{Face, FaceImage};
use crate::face_set::FaceSet;

/// Packed atlas image plus everything needed to map it onto the box.
#[derive(Debug, Clone)]
pub struct AtlasBitmap {
    image: RgbaImage,
    layout: AtlasLayout,
}

impl AtlasBitmap {
    /// Build an atlas straight from a face set: infer extents from the front
    /// and left images, pad missing faces, then pack.
    pub fn from_face_set(face_set: FaceSet, debug_overlay: bool) -> Result<Self, AtlasError> {
        let extents = face_set.extents()?;
        let resolved = face_set.resolve();
        AtlasBuilder::new(extents)
            .with_full_x_rotation(resolved.supports_full_x_rotation)
            .with_debug_overlay(debug_overlay)
            .build(resolved.images)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn region(&self, face: Face) -> AtlasRegion {
        self.layout.region(face)
    }

    pub fn extents(&self) -> CuboidExtents {
        self.layout.extents
    }

    pub fn supports_full_x_rotation(&self) -> bool {
        self.layout.supports_full_x_rotation
    }

    /// Split into pixels and layout so the pixels can be dropped after upload.
    pub fn into_parts(self) -> (RgbaImage, AtlasLayout) {
        (self.image, self.layout)
    }
}

/// Packs six face images into an [`AtlasBitmap`].
#[derive(Debug, Clone, Copy)]
pub struct AtlasBuilder {
    extents: CuboidExtents,
    supports_full_x_rotation: bool,
    debug_overlay: bool,
}

impl AtlasBuilder {
    pub fn new(extents: CuboidExtents) -> Self {
        Self {
            extents,
            supports_full_x_rotation: true,
            debug_overlay: false,
        }
    }

    pub fn with_full_x_rotation(mut self, supported: bool) -> Self {
        self.supports_full_x_rotation = supported;
        self
    }

    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.debug_overlay = enabled;
        self
    }

    /// Target pixel size of every face, in canonical order.
    ///
    /// `base_pixels` is the tallest source image height; a face whose
    /// physical ratio equals the largest half-extent gets exactly that many
    /// pixels along that axis. Both axes are floored at 1.
    pub fn target_sizes(&self, base_pixels: u32) -> [(u32, u32); FACE_COUNT] {
        let max_dim = self.extents.max_half_extent();
        let scale = |ratio: f32| (((ratio / max_dim) * base_pixels as f32).floor() as u32).max(1);

        Face::ALL.map(|face| {
            let (rw, rh) = physical_ratio(face, &self.extents);
            (scale(rw), scale(rh))
        })
    }

    /// Pack `faces` (canonical order, exactly six) into one bitmap.
    ///
    /// The source images are consumed.
    pub fn build(&self, faces: Vec<FaceImage>) -> Result<AtlasBitmap, AtlasError> {
        if faces.len() != FACE_COUNT {
            return Err(AtlasError::FaceCount(faces.len()));
        }
        let e = &self.extents;
        if !(e.half_height > 0.0 && e.half_width >= 0.0 && e.half_depth >= 0.0) {
            return Err(AtlasError::InvalidExtents(*e));
        }

        let base_pixels = faces.iter().map(FaceImage::height).max().unwrap_or(1);
        let sizes = self.target_sizes(base_pixels);
        let grid = GridLayout::from_sizes(&sizes);
        let (atlas_width, atlas_height) = (grid.width(), grid.height());

        let mut image = RgbaImage::new(atlas_width, atlas_height);
        let mut placements = Vec::with_capacity(FACE_COUNT);

        for (slot, (face, source)) in Face::ALL.into_iter().zip(faces).enumerate() {
            let (w, h) = sizes[slot];
            let (x, y) = grid.cell_origin(slot);

            let source = source.into_pixels();
            let scaled = if source.dimensions() == (w, h) {
                source
            } else {
                imageops::resize(&source, w, h, FilterType::Triangle)
            };
            imageops::replace(&mut image, &scaled, i64::from(x), i64::from(y));

            placements.push(FacePlacement {
                face,
                region: AtlasRegion::from_pixels(x, y, w, h, atlas_width, atlas_height),
                size: (w, h),
            });
        }

        if self.debug_overlay {
            let min_dim = sizes.iter().map(|&(w, h)| w.min(h)).min().unwrap_or(1);
            overlay::draw(&mut image, &placements, min_dim);
        }

        tracing::debug!(
            "Packed atlas {}x{} (base {}px, full rotation: {})",
            atlas_width,
            atlas_height,
            base_pixels,
            self.supports_full_x_rotation
        );

        Ok(AtlasBitmap {
            image,
            layout: AtlasLayout {
                width: atlas_width,
                height: atlas_height,
                faces: placements,
                extents: self.extents,
                supports_full_x_rotation: self.supports_full_x_rotation,
            },
        })
    }
}

/// Real-world (width, height) of a face in half-extent units.
pub fn physical_ratio(face: Face, extents: &CuboidExtents) -> (f32, f32) {
    match face {
        Face::Front | Face::Back => (extents.half_width, extents.half_height),
        Face::Left | Face::Right => (extents.half_depth, extents.half_height),
        Face::Top | Face::Bottom => (extents.half_width, extents.half_depth),
    }
}

/// Column widths and row heights of the 3×2 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridLayout {
    column_widths: [u32; ATLAS_COLUMNS],
    row_heights: [u32; ATLAS_ROWS],
}

impl GridLayout {
    fn from_sizes(sizes: &[(u32, u32); FACE_COUNT]) -> Self {
        let mut column_widths = [0; ATLAS_COLUMNS];
        let mut row_heights = [0; ATLAS_ROWS];
        for (slot, &(w, h)) in sizes.iter().enumerate() {
            let (col, row) = (slot % ATLAS_COLUMNS, slot / ATLAS_COLUMNS);
            column_widths[col] = column_widths[col].max(w);
            row_heights[row] = row_heights[row].max(h);
        }
        Self {
            column_widths,
            row_heights,
        }
    }

    fn width(&self) -> u32 {
        self.column_widths.iter().sum()
    }

    fn height(&self) -> u32 {
        self.row_heights.iter().sum()
    }

    fn cell_origin(&self, slot: usize) -> (u32, u32) {
        let (col, row) = (slot % ATLAS_COLUMNS, slot / ATLAS_COLUMNS);
        (
            self.column_widths[..col].iter().sum(),
            self.row_heights[..row].iter().sum(),
        )
    }
}

/// Atlas building errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AtlasError {
    #[error("Atlas needs exactly 6 face images, got {0}")]
    FaceCount(usize),
    #[error("Invalid cuboid extents: {0:?}")]
    InvalidExtents(CuboidExtents),
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> FaceImage {
        FaceImage::solid(w, h, rgba).unwrap()
    }

    fn uniform_faces(size: u32) -> Vec<FaceImage> {
        (0..6).map(|i| solid(size, size, [i * 40, 0, 0, 255])).collect()
    }

    fn big_box_set() -> FaceSet {
        FaceSet::Full {
            front: solid(700, 900, [200, 0, 0, 255]),
            back: solid(700, 900, [0, 200, 0, 255]),
            top: solid(700, 200, [0, 0, 200, 255]),
            bottom: solid(700, 200, [200, 200, 0, 255]),
            left: solid(200, 900, [0, 200, 200, 255]),
            right: solid(200, 900, [200, 0, 200, 255]),
        }
    }

    fn assert_regions_valid(layout: &AtlasLayout) {
        for p in &layout.faces {
            let r = p.region;
            assert!(0.0 <= r.u0 && r.u0 < r.u1 && r.u1 <= 1.0, "{:?}", p);
            assert!(0.0 <= r.v0 && r.v0 < r.v1 && r.v1 <= 1.0, "{:?}", p);
        }
        for (i, a) in layout.faces.iter().enumerate() {
            for b in &layout.faces[i + 1..] {
                assert!(!a.region.overlaps(&b.region), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_uniform_faces_tile_exactly() {
        let atlas = AtlasBuilder::new(CuboidExtents::cube())
            .build(uniform_faces(64))
            .unwrap();
        assert_eq!((atlas.width(), atlas.height()), (192, 128));

        for face in Face::ALL {
            let r = atlas.region(face);
            assert!((r.u1 - r.u0 - 1.0 / 3.0).abs() < 1e-6);
            assert!((r.v1 - r.v0 - 0.5).abs() < 1e-6);
        }
        let area: f32 = atlas.layout().faces.iter().map(|p| p.region.area()).sum();
        assert!((area - 1.0).abs() < 1e-5);
        assert_regions_valid(atlas.layout());
    }

    #[test]
    fn test_grid_order_is_row_major() {
        let atlas = AtlasBuilder::new(CuboidExtents::cube())
            .build(uniform_faces(8))
            .unwrap();
        let expect = [
            (Face::Front, 0.0, 0.0),
            (Face::Back, 1.0 / 3.0, 0.0),
            (Face::Left, 2.0 / 3.0, 0.0),
            (Face::Right, 0.0, 0.5),
            (Face::Top, 1.0 / 3.0, 0.5),
            (Face::Bottom, 2.0 / 3.0, 0.5),
        ];
        for (face, u0, v0) in expect {
            let r = atlas.region(face);
            assert!((r.u0 - u0).abs() < 1e-6, "{face}");
            assert!((r.v0 - v0).abs() < 1e-6, "{face}");
        }
        // Pixels of each source land inside its cell
        assert_eq!(atlas.image().get_pixel(8, 0).0, [40, 0, 0, 255]);
        assert_eq!(atlas.image().get_pixel(23, 15).0, [200, 0, 0, 255]);
    }

    #[test]
    fn test_proportional_sizes_for_big_box() {
        let atlas = AtlasBitmap::from_face_set(big_box_set(), false).unwrap();
        let layout = atlas.layout();

        assert_eq!(layout.size(Face::Front), (700, 900));
        assert_eq!(layout.size(Face::Left), (200, 900));
        assert_eq!(layout.size(Face::Top), (700, 200));
        // Columns: max(700, 200), max(700, 700), max(200, 700)
        // Rows: max(900, 900, 900), max(900, 200, 200)
        assert_eq!((atlas.width(), atlas.height()), (2100, 1800));
        assert_regions_valid(layout);

        let covered: f32 = layout.faces.iter().map(|p| p.region.area()).sum();
        assert!(covered < 1.0);
    }

    #[test]
    fn test_sizes_follow_box_not_photo_resolution() {
        // Low-res spine next to a high-res front still gets full height
        let set = FaceSet::Full {
            front: solid(700, 900, [1, 1, 1, 255]),
            back: solid(70, 90, [1, 1, 1, 255]),
            top: solid(7, 2, [1, 1, 1, 255]),
            bottom: solid(7, 2, [1, 1, 1, 255]),
            left: solid(20, 90, [1, 1, 1, 255]),
            right: solid(20, 90, [1, 1, 1, 255]),
        };
        let atlas = AtlasBitmap::from_face_set(set, false).unwrap();
        assert_eq!(atlas.layout().size(Face::Back), (700, 900));
        assert_eq!(atlas.layout().size(Face::Right), (200, 900));
    }

    #[test]
    fn test_target_sizes_floor_at_one_pixel() {
        let extents = CuboidExtents::from_face_sizes((10, 10), (1, 1000)).unwrap();
        let sizes = AtlasBuilder::new(extents).target_sizes(10);
        for (w, h) in sizes {
            assert!(w >= 1 && h >= 1);
        }
        assert_eq!(sizes[Face::Left.index()].0, 1);
    }

    #[test]
    fn test_equatorial_atlas() {
        let set = FaceSet::Equatorial {
            front: solid(64, 64, [9, 9, 9, 255]),
            back: solid(64, 64, [9, 9, 9, 255]),
            left: solid(64, 64, [9, 9, 9, 255]),
            right: solid(64, 64, [9, 9, 9, 255]),
        };
        let atlas = AtlasBitmap::from_face_set(set, false).unwrap();
        assert!(!atlas.supports_full_x_rotation());
        assert_eq!((atlas.width(), atlas.height()), (192, 128));
        // Filler upscaled to a full black cell
        let r = atlas.region(Face::Top);
        let x = (r.u0 * atlas.width() as f32) as u32 + 5;
        let y = (r.v0 * atlas.height() as f32) as u32 + 5;
        assert_eq!(atlas.image().get_pixel(x, y).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_wrong_face_count() {
        let result = AtlasBuilder::new(CuboidExtents::cube()).build(uniform_faces(4)[..5].to_vec());
        assert!(matches!(result, Err(AtlasError::FaceCount(5))));
    }

    #[test]
    fn test_debug_overlay_draws_border() {
        let plain = AtlasBuilder::new(CuboidExtents::cube())
            .build(uniform_faces(64))
            .unwrap();
        let debug = AtlasBuilder::new(CuboidExtents::cube())
            .with_debug_overlay(true)
            .build(uniform_faces(64))
            .unwrap();
        assert_eq!(plain.image().get_pixel(64, 0).0, [40, 0, 0, 255]);
        assert_eq!(
            debug.image().get_pixel(64, 0).0,
            crate::constants::DEBUG_BORDER_COLOR
        );
        // Layout is unaffected by the overlay
        assert_eq!(plain.layout(), debug.layout());
    }
}

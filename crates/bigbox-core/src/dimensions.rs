//! Box proportions inferred from the face photos

use serde::{Deserialize, Serialize};

/// Half-extents of the cuboid along X (width), Y (height) and Z (depth).
///
/// The largest of the three raw aspect-derived values maps to 1.0, so the
/// biggest visual dimension of the box always has unit half-extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuboidExtents {
    pub half_width: f32,
    pub half_height: f32,
    pub half_depth: f32,
}

impl CuboidExtents {
    /// Derive extents from the front face size and one side face size, in pixels.
    ///
    /// ```
    /// use bigbox_core::CuboidExtents;
    ///
    /// let extents = CuboidExtents::from_face_sizes((800, 600), (200, 600)).unwrap();
    /// assert!((extents.half_width - 1.0).abs() < 1e-6);
    /// assert!((extents.half_depth - 0.25).abs() < 1e-6);
    /// ```
    pub fn from_face_sizes(front: (u32, u32), side: (u32, u32)) -> Result<Self, DimensionError> {
        for (w, h) in [front, side] {
            if w == 0 || h == 0 {
                return Err(DimensionError::NonPositive {
                    width: w,
                    height: h,
                });
            }
        }

        let width_to_height = front.0 as f32 / front.1 as f32;
        let depth_to_height = side.0 as f32 / side.1 as f32;
        let max_dim = width_to_height.max(depth_to_height).max(1.0);

        Ok(Self {
            half_width: width_to_height / max_dim,
            half_height: 1.0 / max_dim,
            half_depth: depth_to_height / max_dim,
        })
    }

    /// A unit cube.
    pub fn cube() -> Self {
        Self {
            half_width: 1.0,
            half_height: 1.0,
            half_depth: 1.0,
        }
    }

    /// Largest of the three half-extents.
    pub fn max_half_extent(&self) -> f32 {
        self.half_width.max(self.half_height).max(self.half_depth)
    }

    /// The eight corners in model space.
    pub fn corners(&self) -> [glam::Vec3; 8] {
        let (w, h, d) = (self.half_width, self.half_height, self.half_depth);
        [
            glam::Vec3::new(-w, -h, -d),
            glam::Vec3::new(w, -h, -d),
            glam::Vec3::new(-w, h, -d),
            glam::Vec3::new(w, h, -d),
            glam::Vec3::new(-w, -h, d),
            glam::Vec3::new(w, -h, d),
            glam::Vec3::new(-w, h, d),
            glam::Vec3::new(w, h, d),
        ]
    }
}

impl Default for CuboidExtents {
    fn default() -> Self {
        Self::cube()
    }
}

/// Dimension inference errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DimensionError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    NonPositive { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_wide_box_normalizes_by_width() {
        let e = CuboidExtents::from_face_sizes((800, 600), (200, 600)).unwrap();
        assert!(approx(e.half_width, 1.0));
        assert!(approx(e.half_height, 0.75));
        assert!(approx(e.half_depth, 0.25));
    }

    #[test]
    fn test_tall_box_keeps_unit_height() {
        // Typical big box: 7:9 front, thin spine
        let e = CuboidExtents::from_face_sizes((700, 900), (200, 900)).unwrap();
        assert!(approx(e.half_height, 1.0));
        assert!(approx(e.half_width, 700.0 / 900.0));
        assert!(approx(e.half_depth, 200.0 / 900.0));
    }

    #[test]
    fn test_deep_box_normalizes_by_depth() {
        let e = CuboidExtents::from_face_sizes((500, 500), (1000, 500)).unwrap();
        assert!(approx(e.half_depth, 1.0));
        assert!(approx(e.half_width, 0.5));
        assert!(approx(e.half_height, 0.5));
        assert!(approx(e.max_half_extent(), 1.0));
    }

    #[test]
    fn test_zero_height_rejected() {
        assert!(CuboidExtents::from_face_sizes((10, 0), (10, 10)).is_err());
        assert!(CuboidExtents::from_face_sizes((10, 10), (0, 10)).is_err());
    }

    #[test]
    fn test_corners_span_box() {
        let e = CuboidExtents {
            half_width: 0.5,
            half_height: 1.0,
            half_depth: 0.25,
        };
        let corners = e.corners();
        let max = corners.iter().fold(glam::Vec3::splat(f32::MIN), |a, c| a.max(*c));
        let min = corners.iter().fold(glam::Vec3::splat(f32::MAX), |a, c| a.min(*c));
        assert_eq!(max, glam::Vec3::new(0.5, 1.0, 0.25));
        assert_eq!(min, -max);
    }
}

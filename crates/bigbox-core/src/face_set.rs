//! Supported face image sets and their normalization to six faces

use crate::dimensions::{CuboidExtents, DimensionError};
use crate::face::{Face, FaceImage};

/// The images a box is built from.
#[derive(Debug, Clone)]
pub enum FaceSet {
    /// All six faces.
    Full {
        front: FaceImage,
        back: FaceImage,
        top: FaceImage,
        bottom: FaceImage,
        left: FaceImage,
        right: FaceImage,
    },
    /// Front, back and the two sides. Top and bottom are never shown in
    /// detail because the pitch is held near the equator.
    Equatorial {
        front: FaceImage,
        back: FaceImage,
        left: FaceImage,
        right: FaceImage,
    },
}

/// Six images in canonical [`Face::ALL`] order plus the rotation capability.
#[derive(Debug, Clone)]
pub struct ResolvedFaces {
    pub images: Vec<FaceImage>,
    pub supports_full_x_rotation: bool,
}

impl FaceSet {
    /// Whether the box may be pitched all the way to ±90°.
    pub fn supports_full_x_rotation(&self) -> bool {
        matches!(self, FaceSet::Full { .. })
    }

    pub fn front(&self) -> &FaceImage {
        match self {
            FaceSet::Full { front, .. } | FaceSet::Equatorial { front, .. } => front,
        }
    }

    pub fn left(&self) -> &FaceImage {
        match self {
            FaceSet::Full { left, .. } | FaceSet::Equatorial { left, .. } => left,
        }
    }

    /// Image supplied for `face`, if the set carries one.
    pub fn get(&self, face: Face) -> Option<&FaceImage> {
        match (self, face) {
            (FaceSet::Full { front, .. }, Face::Front)
            | (FaceSet::Equatorial { front, .. }, Face::Front) => Some(front),
            (FaceSet::Full { back, .. }, Face::Back)
            | (FaceSet::Equatorial { back, .. }, Face::Back) => Some(back),
            (FaceSet::Full { left, .. }, Face::Left)
            | (FaceSet::Equatorial { left, .. }, Face::Left) => Some(left),
            (FaceSet::Full { right, .. }, Face::Right)
            | (FaceSet::Equatorial { right, .. }, Face::Right) => Some(right),
            (FaceSet::Full { top, .. }, Face::Top) => Some(top),
            (FaceSet::Full { bottom, .. }, Face::Bottom) => Some(bottom),
            (FaceSet::Equatorial { .. }, Face::Top | Face::Bottom) => None,
        }
    }

    /// Box proportions from the front and left images.
    pub fn extents(&self) -> Result<CuboidExtents, DimensionError> {
        let front = self.front();
        let side = self.left();
        CuboidExtents::from_face_sizes(
            (front.width(), front.height()),
            (side.width(), side.height()),
        )
    }

    /// Normalize into six images, padding absent faces with 1×1 fillers.
    pub fn resolve(self) -> ResolvedFaces {
        match self {
            FaceSet::Full {
                front,
                back,
                top,
                bottom,
                left,
                right,
            } => ResolvedFaces {
                images: vec![front, back, left, right, top, bottom],
                supports_full_x_rotation: true,
            },
            FaceSet::Equatorial {
                front,
                back,
                left,
                right,
            } => {
                let mut images = vec![front, back, left, right];
                images.resize_with(Face::ALL.len(), FaceImage::filler);
                ResolvedFaces {
                    images,
                    supports_full_x_rotation: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, shade: u8) -> FaceImage {
        FaceImage::solid(w, h, [shade, shade, shade, 255]).unwrap()
    }

    fn equatorial() -> FaceSet {
        FaceSet::Equatorial {
            front: solid(70, 90, 10),
            back: solid(70, 90, 20),
            left: solid(20, 90, 30),
            right: solid(20, 90, 40),
        }
    }

    #[test]
    fn test_full_set_keeps_canonical_order() {
        let set = FaceSet::Full {
            front: solid(4, 4, 1),
            back: solid(4, 4, 2),
            top: solid(4, 4, 5),
            bottom: solid(4, 4, 6),
            left: solid(4, 4, 3),
            right: solid(4, 4, 4),
        };
        assert!(set.supports_full_x_rotation());
        let resolved = set.resolve();
        assert!(resolved.supports_full_x_rotation);
        let shades: Vec<u8> = resolved
            .images
            .iter()
            .map(|img| img.pixels().get_pixel(0, 0).0[0])
            .collect();
        assert_eq!(shades, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_equatorial_set_is_padded_to_six() {
        let set = equatorial();
        assert!(!set.supports_full_x_rotation());
        assert!(set.get(Face::Top).is_none());
        let resolved = set.resolve();
        assert!(!resolved.supports_full_x_rotation);
        assert_eq!(resolved.images.len(), 6);
        for filler in &resolved.images[4..] {
            assert_eq!((filler.width(), filler.height()), (1, 1));
            assert_eq!(filler.pixels().get_pixel(0, 0).0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_extents_use_front_and_left() {
        let extents = equatorial().extents().unwrap();
        assert!((extents.half_height - 1.0).abs() < 1e-6);
        assert!((extents.half_width - 70.0 / 90.0).abs() < 1e-6);
        assert!((extents.half_depth - 20.0 / 90.0).abs() < 1e-6);
    }
}

//! Soft contact shadow approximated from the box's screen-space footprint

use glam::{Mat4, Vec2, Vec4Swizzles};

use crate::dimensions::CuboidExtents;
use crate::geometry::model_matrix;

/// Multiplier from the NDC bounding-box span to the radial fade scale.
pub const SHADOW_SCALE_FACTOR: f32 = 1.0;

/// Screen-space ellipse the shadow fades out over, in NDC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowEllipse {
    pub center: Vec2,
    pub scale: Vec2,
}

/// Project the eight box corners and fit an ellipse to their NDC bounds.
///
/// Corners behind the camera (`w <= 0`) are skipped. Returns `None` when no
/// corner is usable or the footprint is degenerate.
pub fn project_shadow(
    view_proj: Mat4,
    angle_x_deg: f32,
    angle_y_deg: f32,
    extents: &CuboidExtents,
    offset: Vec2,
) -> Option<ShadowEllipse> {
    let mvp = view_proj * model_matrix(angle_x_deg, angle_y_deg);

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;

    for corner in extents.corners() {
        let clip = mvp * corner.extend(1.0);
        if clip.w <= 0.0 {
            continue;
        }
        let ndc = clip.xy() / clip.w;
        min = min.min(ndc);
        max = max.max(ndc);
        any = true;
    }

    if !any {
        return None;
    }

    let span = max - min;
    if span.x <= 0.0 || span.y <= 0.0 {
        return None;
    }

    Some(ShadowEllipse {
        center: (min + max) * 0.5 + offset,
        scale: span * SHADOW_SCALE_FACTOR,
    })
}

/// Hermite step, identical to WGSL `smoothstep` for `edge0 < edge1`.
///
/// Equal edges give a hard step at `edge0`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Shadow alpha at normalized radius `r`.
pub fn shadow_alpha(r: f32, fade_start: f32, fade_end: f32, opacity: f32) -> f32 {
    (1.0 - smoothstep(fade_start, fade_end, r)) * opacity.clamp(0.0, 1.0)
}

/// Alpha at NDC point `p` under `ellipse`.
pub fn shadow_alpha_at(
    p: Vec2,
    ellipse: &ShadowEllipse,
    fade_start: f32,
    fade_end: f32,
    opacity: f32,
) -> f32 {
    let r = ((p - ellipse.center) / ellipse.scale).length();
    shadow_alpha(r, fade_start, fade_end, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn view_proj() -> Mat4 {
        let proj = Mat4::perspective_rh(35f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    #[test]
    fn test_alpha_at_center_equals_opacity() {
        assert_eq!(shadow_alpha(0.0, 0.2, 1.1, 0.6), 0.6);
        assert_eq!(shadow_alpha(0.0, 0.3, 1.4, 1.0), 1.0);
    }

    #[test]
    fn test_alpha_zero_past_fade_end() {
        assert_eq!(shadow_alpha(1.1, 0.2, 1.1, 0.6), 0.0);
        assert_eq!(shadow_alpha(5.0, 0.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(shadow_alpha(0.0, 0.2, 1.1, 3.0), 1.0);
        assert_eq!(shadow_alpha(0.0, 0.2, 1.1, -1.0), 0.0);
    }

    #[test]
    fn test_equal_fade_edges_are_a_hard_edge() {
        assert_eq!(shadow_alpha(0.5, 0.5, 0.5, 0.6), 0.0);
        assert_eq!(shadow_alpha(0.4, 0.5, 0.5, 0.6), 0.6);
        assert!(!shadow_alpha(0.5, 0.5, 0.5, 0.6).is_nan());
    }

    #[test]
    fn test_negative_fade_start_softens_center() {
        let a = shadow_alpha(0.0, -0.5, 1.5, 1.0);
        assert!(a < 1.0 && a > 0.5);
    }

    #[test]
    fn test_unrotated_cube_is_centered() {
        let ellipse =
            project_shadow(view_proj(), 0.0, 0.0, &CuboidExtents::cube(), Vec2::ZERO).unwrap();
        assert!(ellipse.center.length() < 1e-5);
        assert!((ellipse.scale.x - ellipse.scale.y).abs() < 1e-5);
        assert!(ellipse.scale.x > 0.0);
    }

    #[test]
    fn test_offset_moves_center() {
        let offset = Vec2::new(0.1, -0.2);
        let ellipse =
            project_shadow(view_proj(), 20.0, 30.0, &CuboidExtents::cube(), offset).unwrap();
        let plain =
            project_shadow(view_proj(), 20.0, 30.0, &CuboidExtents::cube(), Vec2::ZERO).unwrap();
        assert!((ellipse.center - plain.center - offset).length() < 1e-6);
        assert_eq!(ellipse.scale, plain.scale);
    }

    #[test]
    fn test_box_behind_camera_has_no_shadow() {
        let proj = Mat4::perspective_rh(35f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 8.0), Vec3::new(0.0, 0.0, 20.0), Vec3::Y);
        let shadow = project_shadow(proj * view, 0.0, 0.0, &CuboidExtents::cube(), Vec2::ZERO);
        assert!(shadow.is_none());
    }

    #[test]
    fn test_alpha_at_ellipse_center() {
        let ellipse = ShadowEllipse {
            center: Vec2::new(0.1, 0.1),
            scale: Vec2::new(0.5, 0.5),
        };
        assert_eq!(shadow_alpha_at(Vec2::new(0.1, 0.1), &ellipse, 0.2, 1.1, 0.6), 0.6);
        assert_eq!(shadow_alpha_at(Vec2::new(0.9, 0.1), &ellipse, 0.2, 1.1, 0.6), 0.0);
    }
}

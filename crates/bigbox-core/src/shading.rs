//! CPU reference of the cuboid lighting model
//!
//! Mirrors `cuboid.wgsl` term for term: an ambient floor on the diffuse
//! term plus one reflect-based specular lobe whose sharpness and strength
//! both follow a single gloss scalar.

use glam::Vec3;

use crate::constants::{AMBIENT, SHININESS_RANGE, SPECULAR_RANGE};

/// Light color used by the renderer.
pub const LIGHT_COLOR: Vec3 = Vec3::ONE;

/// Light sits this far behind the camera along Z, relative to camera distance.
pub const LIGHT_DISTANCE_FACTOR: f32 = 1.6;

/// Specular exponent for a gloss value.
pub fn shininess(gloss: f32) -> f32 {
    let g = gloss.clamp(0.0, 1.0);
    SHININESS_RANGE.0 + (SHININESS_RANGE.1 - SHININESS_RANGE.0) * g
}

/// Specular intensity for a gloss value.
pub fn specular_power(gloss: f32) -> f32 {
    let g = gloss.clamp(0.0, 1.0);
    SPECULAR_RANGE.0 + (SPECULAR_RANGE.1 - SPECULAR_RANGE.0) * g
}

/// Light position for a camera at `(0, 0, camera_z)`.
pub fn light_position(camera_z: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, camera_z * LIGHT_DISTANCE_FACTOR)
}

/// Inputs to [`shade`], all in world space.
#[derive(Debug, Clone, Copy)]
pub struct ShadeInput {
    pub texel: Vec3,
    pub normal: Vec3,
    pub frag_pos: Vec3,
    pub light_pos: Vec3,
    pub view_pos: Vec3,
    pub light_color: Vec3,
    pub gloss: f32,
}

/// Lit color of one fragment.
pub fn shade(input: &ShadeInput) -> Vec3 {
    let n = input.normal.normalize_or_zero();
    let l = (input.light_pos - input.frag_pos).normalize_or_zero();
    let v = (input.view_pos - input.frag_pos).normalize_or_zero();

    let diffuse = n.dot(l).max(0.0);
    let reflected = reflect(-l, n);
    let spec = v.dot(reflected).max(0.0).powf(shininess(input.gloss)) * specular_power(input.gloss);

    input.texel * (AMBIENT + (1.0 - AMBIENT) * diffuse) + input.light_color * spec
}

/// GLSL/WGSL `reflect`.
fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * n.dot(i) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_on(gloss: f32) -> ShadeInput {
        ShadeInput {
            texel: Vec3::splat(0.5),
            normal: Vec3::Z,
            frag_pos: Vec3::ZERO,
            light_pos: light_position(8.0),
            view_pos: Vec3::new(0.0, 0.0, 8.0),
            light_color: LIGHT_COLOR,
            gloss,
        }
    }

    #[test]
    fn test_gloss_ranges() {
        assert_eq!(shininess(0.0), 8.0);
        assert_eq!(shininess(1.0), 128.0);
        assert_eq!(specular_power(0.0), 0.05);
        assert!((specular_power(1.0) - 1.0).abs() < 1e-6);
        // Out-of-range gloss is clamped
        assert_eq!(shininess(4.0), 128.0);
        assert_eq!(specular_power(-1.0), 0.05);
    }

    #[test]
    fn test_head_on_light_is_full_diffuse_plus_spec() {
        let c = shade(&head_on(1.0));
        // texel * (0.4 + 0.6) + 1.0 * 1.0
        assert!((c - Vec3::splat(1.5)).length() < 1e-5);

        let matte = shade(&head_on(0.0));
        assert!((matte - Vec3::splat(0.55)).length() < 1e-5);
    }

    #[test]
    fn test_light_behind_surface_gets_ambient_only() {
        let mut input = head_on(0.6);
        input.light_pos = Vec3::new(0.0, 0.0, -10.0);
        let c = shade(&input);
        assert!((c - Vec3::splat(0.5 * AMBIENT)).length() < 1e-5);
    }

    #[test]
    fn test_higher_gloss_tightens_highlight() {
        let mut input = head_on(0.0);
        input.view_pos = Vec3::new(3.0, 0.0, 8.0);
        let matte = shade(&input);
        input.gloss = 1.0;
        let glossy = shade(&input);
        // Off-axis the sharper lobe contributes less specular
        assert!(glossy.x < matte.x);
        assert!(glossy.x > 0.5);
    }

    #[test]
    fn test_light_behind_camera() {
        assert_eq!(light_position(8.0), Vec3::new(0.0, 0.0, 12.8));
    }
}

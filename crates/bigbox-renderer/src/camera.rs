//! Fixed-axis camera looking at the box from +Z

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera on the +Z axis, aimed at the origin with +Y up.
///
/// Zoom moves the camera along the axis: distance = `base_distance / zoom`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Camera distance at zoom 1.0
    pub base_distance: f32,
}

impl Camera {
    /// Create a camera from config values
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
            base_distance: config.base_distance,
        }
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Camera Z for a given zoom factor
    pub fn distance(&self, zoom_factor: f32) -> f32 {
        self.base_distance / zoom_factor
    }

    /// Eye position for a given zoom factor
    pub fn eye(&self, zoom_factor: f32) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance(zoom_factor))
    }

    /// Get view matrix
    pub fn view_matrix(&self, zoom_factor: f32) -> Mat4 {
        Mat4::look_at_rh(self.eye(zoom_factor), Vec3::ZERO, Vec3::Y)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }
}

/// Marks the cached view as needing a rebuild.
const STALE_ZOOM: f32 = -1.0;

/// View/projection matrices cached against the zoom factor.
///
/// The view matrix only depends on zoom, so it is rebuilt only when zoom
/// changes or after [`ViewTransforms::invalidate`].
#[derive(Debug, Clone)]
pub struct ViewTransforms {
    camera: Camera,
    cached_zoom: f32,
    view: Mat4,
    projection: Mat4,
    view_proj: Mat4,
    rebuilds: u32,
}

impl ViewTransforms {
    /// Wrap a camera; the first [`update`](Self::update) always rebuilds.
    pub fn new(camera: Camera) -> Self {
        let projection = camera.projection_matrix();
        Self {
            camera,
            cached_zoom: STALE_ZOOM,
            view: Mat4::IDENTITY,
            projection,
            view_proj: projection,
            rebuilds: 0,
        }
    }

    /// New aspect ratio: rebuild projection, mark view stale.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.update_aspect(width as f32 / height as f32);
        self.projection = self.camera.projection_matrix();
        self.invalidate();
    }

    /// Force a rebuild on the next update.
    pub fn invalidate(&mut self) {
        self.cached_zoom = STALE_ZOOM;
    }

    /// Rebuild view matrices if `zoom_factor` differs from the cached one.
    /// Returns whether a rebuild happened.
    pub fn update(&mut self, zoom_factor: f32) -> bool {
        if self.cached_zoom == zoom_factor {
            return false;
        }
        self.view = self.camera.view_matrix(zoom_factor);
        self.view_proj = self.projection * self.view;
        self.cached_zoom = zoom_factor;
        self.rebuilds += 1;
        true
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// View matrix as of the last update
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Projection × view as of the last update
    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    /// Camera Z at the cached zoom
    pub fn camera_z(&self) -> f32 {
        if self.cached_zoom > 0.0 {
            self.camera.distance(self.cached_zoom)
        } else {
            self.camera.base_distance
        }
    }

    /// Number of view rebuilds so far
    pub fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transforms() -> ViewTransforms {
        ViewTransforms::new(Camera::new(&CameraConfig::default(), 1.0))
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::new(&CameraConfig::default(), 1.5);
        assert!((camera.fov.to_degrees() - 35.0).abs() < 1e-4);
        assert_eq!(camera.distance(1.0), 8.0);
        assert_eq!(camera.distance(2.0), 4.0);
        assert_eq!(camera.eye(0.5), Vec3::new(0.0, 0.0, 16.0));
    }

    #[test]
    fn test_view_rebuilt_only_on_zoom_change() {
        let mut t = transforms();
        assert!(t.update(1.0));
        assert!(!t.update(1.0));
        assert!(!t.update(1.0));
        assert!(t.update(1.5));
        assert_eq!(t.rebuild_count(), 2);
    }

    #[test]
    fn test_resize_marks_view_stale() {
        let mut t = transforms();
        t.update(1.0);
        t.resize(800, 400);
        assert!(t.update(1.0));
        assert!((t.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut t = transforms();
        t.update(1.0);
        t.resize(0, 100);
        assert!(!t.update(1.0));
        assert_eq!(t.camera().aspect, 1.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut t = transforms();
        t.update(1.0);
        let clip = t.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
        assert!((clip.w - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_camera_z_follows_zoom() {
        let mut t = transforms();
        assert_eq!(t.camera_z(), 8.0);
        t.update(2.0);
        assert_eq!(t.camera_z(), 4.0);
    }
}

//! Orthographic Camera
//!
//! Fixed half-height view volume; the horizontal extent follows the
//! viewport aspect ratio.

use glam::{Mat4, Vec2, Vec3};

use super::raycast::{CameraBasis, OrthoBounds, camera_basis, orthographic_ray};
use crate::config::CameraConfig;
use crate::physics::collision::Ray;

#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    /// Half the visible height.
    pub distance: f32,
    pub aspect: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl OrthographicCamera {
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            distance: config.distance,
            aspect: 1.0,
            position: config.position,
            target: config.target,
            near: config.near,
            far: config.far,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Update the aspect ratio from a viewport size.
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn left(&self) -> f32 {
        -self.distance * self.aspect
    }

    pub fn right(&self) -> f32 {
        self.distance * self.aspect
    }

    pub fn top(&self) -> f32 {
        self.distance
    }

    pub fn bottom(&self) -> f32 {
        -self.distance
    }

    pub fn bounds(&self) -> OrthoBounds {
        OrthoBounds {
            left: self.left(),
            right: self.right(),
            top: self.top(),
            bottom: self.bottom(),
            near: self.near,
        }
    }

    pub fn basis(&self) -> CameraBasis {
        camera_basis(self.position, self.target)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.basis().up)
    }

    /// Projection with a 0..1 depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left(),
            self.right(),
            self.bottom(),
            self.top(),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Picking ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        orthographic_ray(self.position, &self.basis(), &self.bounds(), ndc)
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, point: Vec3) -> Vec2 {
        self.view_proj().project_point3(point).truncate()
    }

    /// View-space depth of a world point (distance along forward).
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.basis().forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthographicCamera {
        OrthographicCamera::from_config(&CameraConfig::default(), 1600, 800)
    }

    #[test]
    fn test_aspect_from_viewport() {
        let cam = camera();
        assert_eq!(cam.aspect, 2.0);
        assert_eq!(cam.left(), -30.0);
        assert_eq!(cam.right(), 30.0);
        assert_eq!(cam.top(), 15.0);
    }

    #[test]
    fn test_zero_viewport_ignored() {
        let mut cam = camera();
        cam.set_viewport(0, 600);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = camera();
        let ndc = cam.project(Vec3::ZERO);
        assert!(ndc.length() < 1e-5, "{ndc:?}");
    }

    #[test]
    fn test_ray_through_projected_point_hits_it() {
        let cam = camera();
        let point = Vec3::new(3.0, -2.0, 1.0);
        let ray = cam.ray_from_ndc(cam.project(point));
        // Closest approach of the ray to the point.
        let t = (point - ray.origin).dot(ray.direction);
        assert!(t > 0.0);
        assert!((ray.at(t) - point).length() < 1e-3, "{:?}", ray.at(t));
    }

    #[test]
    fn test_view_depth_of_target() {
        let cam = camera();
        let expected = Vec3::new(-10.0, 4.0, 13.0).length();
        assert!((cam.view_depth(Vec3::ZERO) - expected).abs() < 1e-4);
    }
}

//! Raycast Module
//!
//! Picking rays for an orthographic camera. Every ray shares the camera's
//! forward direction; only the origin moves across the view plane.

use glam::{Vec2, Vec3};

use crate::physics::collision::Ray;

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Build the camera frame looking from `camera_pos` at `camera_target`.
pub fn camera_basis(camera_pos: Vec3, camera_target: Vec3) -> CameraBasis {
    let forward = (camera_target - camera_pos).normalize_or(Vec3::NEG_Z);
    let up_world = Vec3::Y;

    // Handle edge case when looking straight up/down
    let right = if forward.y.abs() > 0.99 {
        Vec3::X
    } else {
        forward.cross(up_world).normalize()
    };
    let up = right.cross(forward).normalize();

    CameraBasis { forward, right, up }
}

/// View-plane bounds of an orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
}

/// Ray through normalized device coordinates `ndc` (both axes in -1..1,
/// +Y up).
///
/// The origin sits on the near plane so that objects between the camera
/// and a negative near plane are still hit.
pub fn orthographic_ray(
    camera_pos: Vec3,
    basis: &CameraBasis,
    bounds: &OrthoBounds,
    ndc: Vec2,
) -> Ray {
    let half_w = (bounds.right - bounds.left) * 0.5;
    let half_h = (bounds.top - bounds.bottom) * 0.5;
    let center_x = (bounds.right + bounds.left) * 0.5;
    let center_y = (bounds.top + bounds.bottom) * 0.5;

    let origin = camera_pos
        + basis.right * (center_x + ndc.x * half_w)
        + basis.up * (center_y + ndc.y * half_h)
        + basis.forward * bounds.near;

    Ray::new(origin, basis.forward)
}

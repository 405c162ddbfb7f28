//! Collision detection module
//!
//! Ray queries used for mouse picking. Rigid-body contacts are rapier's
//! business; these helpers only answer "which triangle does this ray hit".
//!
//! # Ray-AABB Intersection
//!
//! The slab method finds the entry and exit times for each axis. It is used
//! as a cheap reject before testing individual triangles.
//!
//! # Ray-Triangle Intersection
//!
//! Möller–Trumbore, without backface culling (callers decide sidedness from
//! the returned normal).
//!
//! # Example
//!
//! ```ignore
//! use letter_drop_engine::physics::collision::{Ray, ray_aabb_intersect};
//! use glam::Vec3;
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//! if let Some(t) = ray_aabb_intersect(ray.origin, ray.direction, Vec3::splat(-1.0), Vec3::ONE) {
//!     println!("Hit at distance {}: {:?}", t, ray.at(t));
//! }
//! ```

use glam::{Mat4, Vec3};

/// A half-line: `origin + t * direction` for `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by an affine matrix.
    ///
    /// The direction is not renormalized, so `t` values stay comparable
    /// with the untransformed ray when the matrix has no scale.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Nearest hit of a ray against a triangle soup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray.
    pub distance: f32,
    /// Hit position (same space as the ray).
    pub point: Vec3,
    /// Index of the struck triangle.
    pub triangle: usize,
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components become huge inverse values
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * if d < 0.0 { -1.0 } else { 1.0 }
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Möller–Trumbore ray/triangle test.
///
/// Returns the ray parameter of the hit, or `None` when the ray misses,
/// runs parallel to the triangle, or the hit lies behind the origin.
pub fn ray_triangle_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_aabb_hit_from_outside() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::ONE,
        );
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_ray_aabb_inside_returns_exit() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn test_ray_aabb_miss() {
        let t = ray_aabb_intersect(
            Vec3::new(5.0, 5.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::ONE,
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::ONE,
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_triangle_hit() {
        let t = ray_triangle_intersect(
            Vec3::new(0.25, 0.25, 3.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!((t.unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_triangle_hits_either_winding() {
        let t = ray_triangle_intersect(
            Vec3::new(0.25, 0.25, 3.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::Y,
            Vec3::X,
        );
        assert!(t.is_some());
    }

    #[test]
    fn test_ray_triangle_miss_outside_edges() {
        let t = ray_triangle_intersect(
            Vec3::new(0.9, 0.9, 3.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_triangle_parallel() {
        let t = ray_triangle_intersect(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::X,
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_transform_keeps_distances_for_rigid_motion() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0));
        let local = ray.transformed(&m);
        assert_eq!(local.origin, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(local.direction, Vec3::NEG_Z);
    }
}

//! Physics type re-exports and conversions
//!
//! glam is the math vocabulary of the crate; rapier speaks nalgebra.
//! Conversions live here so nothing else needs to import nalgebra.

pub use glam::{Quat, Vec3};

use rapier3d::prelude::{Point, Real, Rotation, Vector};

/// Handle of a rigid body inside [`super::PhysicsWorld`].
pub type BodyHandle = rapier3d::prelude::RigidBodyHandle;

/// Handle of a joint inside [`super::PhysicsWorld`].
pub type JointHandle = rapier3d::prelude::ImpulseJointHandle;

#[inline]
pub fn to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_rotation(r: &Rotation<Real>) -> Quat {
    let q = r.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

//! Physics module
//!
//! Thin adapter over `rapier3d`. The rest of the crate only sees glam types
//! and opaque body/joint handles; rapier's nalgebra types stay in here.
//!
//! # Unit System
//!
//! **1 unit = 1 glyph-em / 4** (the menu uses font size 4). Gravity and
//! masses are tuned for that scale rather than SI.
//!
//! # Submodules
//!
//! - [`types`] - glam math types, rapier handles and conversions
//! - [`world`] - the physics world: bodies, joints, contact materials, stepping
//! - [`collision`] - ray/AABB and ray/triangle tests used for mouse picking

pub mod collision;
pub mod types;
pub mod world;

pub use collision::{Ray, RayHit, ray_aabb_intersect, ray_triangle_intersect};
pub use types::{BodyHandle, JointHandle, Quat, Vec3};
pub use world::{BodyDesc, ConeTwistJoint, ContactMaterial, MaterialId, PhysicsWorld};

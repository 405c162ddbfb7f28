//! Physics world settings.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Gravity, stepping and ground-plane parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Fixed simulation step in seconds.
    pub timestep: f32,
    /// Upper bound on fixed steps taken in one frame.
    pub max_substeps: u32,
    /// Half extents of each word's static ground box.
    pub ground_half_extents: Vec3,
    /// Friction of the ground/letter contact pair.
    pub ground_friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -20.0, 0.0),
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            ground_half_extents: Vec3::new(50.0, 0.2, 50.0),
            ground_friction: 0.01,
        }
    }
}

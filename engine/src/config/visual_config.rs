//! Visual Configuration
//!
//! Camera, lights, fog and colours for the menu scene. Colours are stored
//! as `0xRRGGBB` sRGB values, the way they are usually written down.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Orthographic camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Half the visible height in world units.
    pub distance: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 15.0,
            position: Vec3::new(-10.0, 4.0, 13.0),
            target: Vec3::ZERO,
            near: -1.0,
            far: 100.0,
        }
    }
}

/// A directional light shining from `position` towards the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

/// Scene atmosphere and colours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub clear_color: u32,
    pub fog_color: u32,
    /// Linear fog start (view depth).
    pub fog_near: f32,
    /// Linear fog end (view depth).
    pub fog_far: f32,
    pub ambient_color: u32,
    pub lights: Vec<DirectionalLightConfig>,
    pub letter_color: u32,
    pub shininess: f32,
    pub camera: CameraConfig,
    pub vsync: bool,
    /// Multisample count for antialiasing; 1 turns it off.
    pub msaa_samples: u32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: 0xedf6e5,
            fog_color: 0x202533,
            fog_near: -1.0,
            fog_far: 100.0,
            ambient_color: 0xcccccc,
            lights: vec![
                // Fore light
                DirectionalLightConfig {
                    color: 0xffffff,
                    intensity: 0.3,
                    position: Vec3::new(5.0, 5.0, 20.0),
                },
                // Back light
                DirectionalLightConfig {
                    color: 0xffffff,
                    intensity: 1.0,
                    position: Vec3::new(-5.0, -5.0, -10.0),
                },
            ],
            letter_color: 0xcccccc,
            shininess: 30.0,
            camera: CameraConfig::default(),
            vsync: true,
            msaa_samples: 4,
        }
    }
}

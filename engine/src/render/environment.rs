//! Scene lighting, fog and colours, resolved from [`VisualConfig`] into
//! the linear values the shader works with.

use glam::Vec3;

use crate::config::VisualConfig;

/// Convert one sRGB channel (0..1) to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` sRGB to linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// A directional light in linear space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the scene towards the light.
    pub direction: Vec3,
    /// Linear colour scaled by intensity.
    pub radiance: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub clear_color: wgpu::Color,
    pub ambient: Vec3,
    pub lights: Vec<DirectionalLight>,
    pub fog_color: Vec3,
    pub fog_near: f32,
    pub fog_far: f32,
    pub shininess: f32,
}

impl Environment {
    pub fn from_config(config: &VisualConfig) -> Self {
        let clear = hex_to_linear(config.clear_color);
        Self {
            clear_color: wgpu::Color {
                r: clear.x as f64,
                g: clear.y as f64,
                b: clear.z as f64,
                a: 1.0,
            },
            ambient: hex_to_linear(config.ambient_color),
            // Lights aim at the origin from their position.
            lights: config
                .lights
                .iter()
                .map(|light| DirectionalLight {
                    direction: light.position.normalize_or(Vec3::Y),
                    radiance: hex_to_linear(light.color) * light.intensity,
                })
                .collect(),
            fog_color: hex_to_linear(config.fog_color),
            fog_near: config.fog_near,
            fog_far: config.fog_far,
            shininess: config.shininess,
        }
    }
}

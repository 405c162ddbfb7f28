//! Uniform Structs for GPU Shaders
//!
//! GPU-compatible uniform buffer structures that must match
//! `shaders/menu.wgsl` exactly.

use glam::{Mat4, Vec3};

use super::environment::Environment;
use crate::camera::OrthographicCamera;
use crate::scene::Mesh;

/// Directional lights the shader can take.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// One directional light.
///
/// WGSL layout (32 bytes):
///   offset  0: direction (vec4<f32>) xyz = unit vector towards the light
///   offset 16: color (vec4<f32>)     rgb = linear colour * intensity
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuDirectionalLight {
    pub direction: [f32; 4],
    pub color: [f32; 4],
}

/// Per-frame scene uniforms (group 0).
///
/// WGSL layout (256 bytes):
///   offset   0: view_proj (mat4x4<f32>)      = 64 bytes
///   offset  64: camera_pos (vec3<f32>)       + shininess (f32)
///   offset  80: camera_forward (vec3<f32>)   + fog_near (f32)
///   offset  96: fog_color (vec3<f32>)        + fog_far (f32)
///   offset 112: ambient (vec3<f32>)          + light_count (u32)
///   offset 128: lights (array<DirectionalLight, 4>) = 128 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub shininess: f32,
    pub camera_forward: [f32; 3],
    pub fog_near: f32,
    pub fog_color: [f32; 3],
    pub fog_far: f32,
    pub ambient: [f32; 3],
    pub light_count: u32,
    pub lights: [GpuDirectionalLight; MAX_DIRECTIONAL_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 3],
            shininess: 30.0,
            camera_forward: [0.0, 0.0, -1.0],
            fog_near: 0.0,
            fog_color: [0.0; 3],
            fog_far: 100.0,
            ambient: [0.0; 3],
            light_count: 0,
            lights: [GpuDirectionalLight::default(); MAX_DIRECTIONAL_LIGHTS],
        }
    }
}

impl SceneUniforms {
    pub fn new(camera: &OrthographicCamera, env: &Environment) -> Self {
        let mut uniforms = Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            shininess: env.shininess,
            camera_forward: camera.basis().forward.to_array(),
            fog_near: env.fog_near,
            fog_color: env.fog_color.to_array(),
            fog_far: env.fog_far,
            ambient: env.ambient.to_array(),
            light_count: 0,
            lights: [GpuDirectionalLight::default(); MAX_DIRECTIONAL_LIGHTS],
        };
        if env.lights.len() > MAX_DIRECTIONAL_LIGHTS {
            log::warn!(
                "{} directional lights configured, only the first {MAX_DIRECTIONAL_LIGHTS} are used",
                env.lights.len()
            );
        }
        for (slot, light) in uniforms.lights.iter_mut().zip(&env.lights) {
            *slot = GpuDirectionalLight {
                direction: light.direction.extend(0.0).to_array(),
                color: light.radiance.extend(1.0).to_array(),
            };
            uniforms.light_count += 1;
        }
        uniforms
    }
}

/// Per-mesh uniforms (group 1).
///
/// WGSL layout (80 bytes):
///   offset  0: model (mat4x4<f32>)
///   offset 64: color (vec4<f32>)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl MeshUniforms {
    pub fn new(mesh: &Mesh) -> Self {
        Self {
            model: mesh.model_matrix().to_cols_array_2d(),
            color: mesh.color.extend(1.0).to_array(),
        }
    }
}

impl Default for MeshUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: Vec3::ONE.extend(1.0).to_array(),
        }
    }
}

// Compile-time assertion to verify struct sizes match WGSL layout
const _: () = {
    assert!(
        std::mem::size_of::<GpuDirectionalLight>() == 32,
        "GpuDirectionalLight must be 32 bytes to match WGSL"
    );
    assert!(
        std::mem::size_of::<SceneUniforms>() == 256,
        "SceneUniforms must be 256 bytes to match WGSL"
    );
    assert!(
        std::mem::size_of::<MeshUniforms>() == 80,
        "MeshUniforms must be 80 bytes to match WGSL"
    );
};

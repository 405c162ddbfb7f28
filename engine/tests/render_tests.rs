//! Render Tests - Shader Validation and Uniform Layout
//!
//! Validates the mesh shader with naga and checks the CPU-side uniform
//! structs against the layout the shader expects.

use std::sync::Arc;

use glam::Vec3;
use letter_drop_engine::camera::OrthographicCamera;
use letter_drop_engine::config::{CameraConfig, VisualConfig};
use letter_drop_engine::render::{
    Environment, GpuDirectionalLight, MAX_DIRECTIONAL_LIGHTS, MeshUniforms, SceneUniforms,
};
use letter_drop_engine::scene::{Geometry, Mesh};

const MENU_SHADER: &str = include_str!("../../shaders/menu.wgsl");

// ============================================================================
// Shader
// ============================================================================

#[test]
fn test_menu_shader_validates() {
    let module = naga::front::wgsl::parse_str(MENU_SHADER)
        .unwrap_or_else(|e| panic!("menu.wgsl failed to parse: {}", e.emit_to_string(MENU_SHADER)));
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("menu.wgsl failed validation: {e:?}"));
}

#[test]
fn test_menu_shader_entry_points() {
    let module = naga::front::wgsl::parse_str(MENU_SHADER).unwrap();
    let names: Vec<&str> = module
        .entry_points
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

// ============================================================================
// Uniforms
// ============================================================================

#[test]
fn test_uniform_sizes() {
    assert_eq!(std::mem::size_of::<GpuDirectionalLight>(), 32);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 256);
    assert_eq!(std::mem::size_of::<MeshUniforms>(), 80);
}

#[test]
fn test_scene_uniforms_from_defaults() {
    let camera = OrthographicCamera::from_config(&CameraConfig::default(), 800, 600);
    let env = Environment::from_config(&VisualConfig::default());
    let uniforms = SceneUniforms::new(&camera, &env);

    assert_eq!(
        uniforms.light_count as usize,
        env.lights.len().min(MAX_DIRECTIONAL_LIGHTS)
    );
    assert_eq!(uniforms.view_proj, camera.view_proj().to_cols_array_2d());
    assert_eq!(uniforms.camera_pos, camera.position.to_array());
    assert_eq!(uniforms.fog_near, env.fog_near);
}

#[test]
fn test_mesh_uniforms_carry_pose_and_colour() {
    let mut mesh = Mesh::new(Arc::new(Geometry::empty()), Vec3::new(0.5, 0.25, 1.0));
    mesh.position = Vec3::new(1.0, 2.0, 3.0);
    let uniforms = MeshUniforms::new(&mesh);
    assert_eq!(uniforms.model[3][..3], [1.0, 2.0, 3.0]);
    assert_eq!(uniforms.color[..3], [0.5, 0.25, 1.0]);
}

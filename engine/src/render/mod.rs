//! Render Module
//!
//! wgpu rendering of the menu scene: one lit, fogged mesh pipeline drawn
//! through the orthographic camera onto the window surface.

pub mod environment;
pub mod mesh_pass;
pub mod surface;
pub mod uniforms;

pub use environment::{DirectionalLight, Environment, hex_to_linear};
pub use mesh_pass::{DEPTH_FORMAT, MeshRenderPass};
pub use surface::{RenderSurface, apply_resize};
pub use uniforms::{GpuDirectionalLight, MAX_DIRECTIONAL_LIGHTS, MeshUniforms, SceneUniforms};

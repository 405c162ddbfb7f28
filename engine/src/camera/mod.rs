//! Camera Module
//!
//! Orthographic camera state and picking rays.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod orthographic;
pub mod raycast;

pub use orthographic::OrthographicCamera;
pub use raycast::{CameraBasis, OrthoBounds, camera_basis, orthographic_ray};

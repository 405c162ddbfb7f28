//! Letter Drop Engine Library
//!
//! A physics-driven 3D text menu. Each menu label is extruded from a
//! typeface into solid glyph meshes, dropped onto an invisible ground,
//! chained letter-to-letter with hinges and knocked over by clicks.
//!
//! # Modules
//!
//! - [`config`] - Menu, physics and visual settings (JSON / environment)
//! - [`text`] - Typeface loading, outline parsing and glyph extrusion
//! - [`asset`] - Background font loading
//! - [`scene`] - Mesh geometry, scene graph and ray picking
//! - [`physics`] - Rigid bodies, hinges and fixed-step simulation (rapier)
//! - [`menu`] - Word layout and letter bodies
//! - [`camera`] - Orthographic camera and picking rays
//! - [`input`] - Pointer tracking and click impulses
//! - [`render`] - wgpu mesh renderer with lights and fog
//! - [`app`] - The composed [`MenuScene`]
//!
//! # Example
//!
//! ```ignore
//! use letter_drop_engine::{AppConfig, MenuScene};
//!
//! let config = AppConfig::from_env()?;
//! let mut app = MenuScene::new(&config, 1280, 720);
//! app.start_font_load()?;
//!
//! // Every frame
//! app.update(1.0 / 60.0);
//! surface.render(app.scene(), app.camera());
//! ```

pub mod app;
pub mod asset;
pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod physics;
pub mod render;
pub mod scene;
pub mod text;

pub use app::MenuScene;
pub use config::AppConfig;
pub use error::MenuError;

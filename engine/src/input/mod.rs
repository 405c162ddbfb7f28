//! Input Module
//!
//! Platform-agnostic pointer handling. Decoupled from winit so the click
//! path can be driven from tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use letter_drop_engine::input::InputHandler;
//!
//! let mut input = InputHandler::new(25.0);
//! input.on_pointer_move(400.0, 300.0, 800, 600);
//! if let Some(hit) = input.on_click(&camera, &scene, &menu, &mut world) {
//!     println!("knocked {:?}", hit.body);
//! }
//! ```

pub mod handler;
pub mod mouse;

pub use handler::{ClickHit, InputHandler};
pub use mouse::{MouseButton, PointerState, Position};

//! Mouse Input Module
//!
//! Pointer position tracking, decoupled from winit to use generic types.

use glam::Vec2;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// 2D position, used for mouse coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Last known pointer position, in pixels and normalized device coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Pixel position, origin top-left.
    pub position: Position,
    /// -1..1 on both axes, +Y up. Starts at the screen centre.
    pub ndc: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move within a `width` x `height` viewport.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, width: u32, height: u32) {
        self.position = Position::new(x, y);
        if width == 0 || height == 0 {
            return;
        }
        self.ndc = Vec2::new(
            x / width as f32 * 2.0 - 1.0,
            -(y / height as f32 * 2.0 - 1.0),
        );
    }
}

//! Asset loading that happens off the main thread.

pub mod font_loader;

pub use font_loader::{FontLoader, PendingFont};

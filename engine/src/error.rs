//! Error types shared by the loaders.
//!
//! Runtime paths (frame loop, click handling) never fail; only the loaders
//! and GPU setup return errors, and the binary decides whether to log and
//! continue or bail out.

use std::path::PathBuf;

/// Errors raised while loading assets or configuration.
#[derive(Debug)]
pub enum MenuError {
    /// Reading a file from disk failed.
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON deserialization failed.
    JsonError(serde_json::Error),
    /// A glyph outline command string could not be parsed.
    InvalidOutline { glyph: char, reason: String },
    /// The font loader thread went away without delivering a result.
    FontLoadDisconnected,
    /// A configuration value is outside its usable range.
    Config(String),
    /// Surface, adapter or device creation failed.
    Gpu(String),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuError::IoError { path, source } => {
                write!(f, "IO error reading {}: {source}", path.display())
            }
            MenuError::JsonError(e) => write!(f, "JSON error: {e}"),
            MenuError::InvalidOutline { glyph, reason } => {
                write!(f, "invalid outline for glyph {glyph:?}: {reason}")
            }
            MenuError::FontLoadDisconnected => {
                write!(f, "font loader exited without a result")
            }
            MenuError::Config(msg) => write!(f, "invalid config: {msg}"),
            MenuError::Gpu(msg) => write!(f, "GPU setup failed: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MenuError::IoError { source, .. } => Some(source),
            MenuError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        MenuError::JsonError(e)
    }
}

/// Read a whole file, tagging IO failures with the path.
pub fn read_to_string(path: impl Into<PathBuf>) -> Result<String, MenuError> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| MenuError::IoError { path, source })
}

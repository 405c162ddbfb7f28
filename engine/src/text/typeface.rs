//! Typeface
//!
//! Deserializes the JSON font format produced by facetype.js and consumed by
//! three.js `FontLoader`: a map of characters to outline command strings in
//! font units, plus the units-per-em `resolution`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, read_to_string};

/// Fallback character used when a glyph is missing.
pub const FALLBACK_CHAR: char = '?';

/// One glyph entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    #[serde(default)]
    pub ha: f32,
    #[serde(default)]
    pub x_min: Option<f32>,
    #[serde(default)]
    pub x_max: Option<f32>,
    /// Outline command string (absent for whitespace).
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBoundingBox {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

/// A parsed typeface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    pub glyphs: HashMap<char, Glyph>,
    #[serde(default)]
    pub family_name: String,
    /// Font units per em.
    pub resolution: f32,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    #[serde(default)]
    pub underline_thickness: f32,
    #[serde(default)]
    pub bounding_box: FontBoundingBox,
}

impl Typeface {
    /// Parse a typeface JSON document.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let typeface: Typeface = serde_json::from_str(json)?;
        if typeface.resolution <= 0.0 {
            return Err(MenuError::Config(format!(
                "typeface resolution must be positive, got {}",
                typeface.resolution
            )));
        }
        Ok(typeface)
    }

    /// Read and parse a typeface file.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        Self::from_json(&read_to_string(path)?)
    }

    /// World units per font unit for a given em size.
    pub fn scale(&self, size: f32) -> f32 {
        size / self.resolution
    }

    /// Glyph for `ch`, falling back to `?` when the font lacks it.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| {
                log::warn!(
                    "Typeface {:?} has no glyph for {ch:?}, using {FALLBACK_CHAR:?}",
                    self.family_name
                );
                self.glyphs.get(&FALLBACK_CHAR)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"{
        "glyphs": {
            "A": { "ha": 1000, "x_min": 0, "x_max": 1000, "o": "m 0 0 l 1000 0 l 1000 1000 l 0 1000 z " },
            "?": { "ha": 500, "o": "m 0 0 l 500 0 l 500 500 z " },
            " ": { "ha": 600 }
        },
        "familyName": "Test Block",
        "resolution": 1000,
        "boundingBox": { "xMin": 0, "xMax": 1000, "yMin": 0, "yMax": 1000 },
        "underlineThickness": 50
    }"#;

    #[test]
    fn test_parse_typeface() {
        let font = Typeface::from_json(FONT).unwrap();
        assert_eq!(font.family_name, "Test Block");
        assert_eq!(font.resolution, 1000.0);
        assert_eq!(font.glyphs.len(), 3);
        assert_eq!(font.bounding_box.x_max, 1000.0);
        assert!(font.glyphs[&' '].o.is_none());
    }

    #[test]
    fn test_scale() {
        let font = Typeface::from_json(FONT).unwrap();
        assert!((font.scale(4.0) - 0.004).abs() < 1e-9);
    }

    #[test]
    fn test_missing_glyph_falls_back() {
        let font = Typeface::from_json(FONT).unwrap();
        assert_eq!(font.glyph('Z').unwrap().ha, 500.0);
        assert_eq!(font.glyph('A').unwrap().ha, 1000.0);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let err = Typeface::from_json(r#"{ "glyphs": {}, "resolution": 0 }"#).unwrap_err();
        assert!(matches!(err, MenuError::Config(_)));
    }
}

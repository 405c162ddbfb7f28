//! Menu layout and glyph settings.

use serde::{Deserialize, Serialize};

/// Glyph extrusion settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Em size of a glyph in world units.
    pub size: f32,
    /// Extrusion depth along +Z.
    pub height: f32,
    /// Line segments per quadratic/cubic outline curve.
    pub curve_segments: u32,
    /// When enabled the caps are pushed out by `bevel_thickness` on both sides
    /// and the outline grows by `bevel_size` around the glyph body.
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    /// Rings per bevel, front and back.
    pub bevel_segments: u32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: 4.0,
            height: 0.4,
            curve_segments: 5,
            bevel_enabled: true,
            bevel_thickness: 0.35,
            bevel_size: 0.3,
            bevel_segments: 4,
        }
    }
}

impl FontOptions {
    /// Z range `(back, front)` of an extruded glyph.
    pub fn depth_range(&self) -> (f32, f32) {
        let bevel = if self.bevel_enabled {
            self.bevel_thickness
        } else {
            0.0
        };
        (-bevel, self.height + bevel)
    }
}

/// Angular limits of the cone-twist joints chaining letters together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointConfig {
    /// Half-angle of the swing cone (radians).
    pub cone_angle: f32,
    /// Twist limit around the joint axis (radians).
    pub twist_angle: f32,
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            cone_angle: 0.4,
            twist_angle: 0.2,
        }
    }
}

/// Menu contents and layout constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Navigation labels, top row first.
    pub labels: Vec<String>,
    /// Vertical spacing between rows (and ground planes).
    pub margin: f32,
    /// Mass of a whole word, split evenly across its letters.
    pub total_mass: f32,
    /// Magnitude of the click impulse.
    pub force: f32,
    /// three.js typeface JSON file.
    pub font_path: String,
    pub font: FontOptions,
    pub joint: JointConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            labels: vec!["WORK".into(), "ABOUT".into(), "CONTACT".into()],
            margin: 7.0,
            total_mass: 1.0,
            force: 25.0,
            font_path: "assets/fonts/droid_sans_mono_regular.typeface.json".into(),
            font: FontOptions::default(),
            joint: JointConfig::default(),
        }
    }
}

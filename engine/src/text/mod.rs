//! Text Module
//!
//! Turns characters into extruded 3D glyph meshes:
//!
//! 1. [`typeface`] parses a three.js typeface JSON document
//! 2. [`outline`] flattens a glyph's outline commands into closed contours
//! 3. [`extrude`] tessellates the caps and stitches the bevelled side walls

pub mod extrude;
pub mod outline;
pub mod typeface;

pub use extrude::{
    GlyphMesh, WallRing, extrude_contours, extrude_glyph, straight_walls, wall_rings,
};
pub use outline::{Contour, OutlineCommand, flatten_outline, parse_outline};
pub use typeface::{Glyph, Typeface};

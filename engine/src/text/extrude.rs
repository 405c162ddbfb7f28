//! Glyph Extrusion
//!
//! Builds a closed solid from a glyph's flattened contours: a front cap, a
//! back cap and a side wall stitched between rings of the outline. Caps are
//! filled with lyon's tessellator using the non-zero rule, so holes work
//! whichever way the font winds its contours.
//!
//! With the bevel enabled the wall is swept through quarter-circle rings:
//! the outline starts at its true shape on each cap and grows by
//! `bevel_size` over `bevel_segments` steps towards the glyph body.

use std::f32::consts::{FRAC_PI_2, SQRT_2};

use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use super::outline::{Contour, flatten_outline, parse_outline, signed_area};
use super::typeface::Typeface;
use crate::config::FontOptions;
use crate::error::MenuError;
use crate::scene::{Aabb, Geometry, MeshVertex};

/// An extruded glyph ready to be placed in the scene.
#[derive(Debug, Clone)]
pub struct GlyphMesh {
    pub ch: char,
    pub geometry: Geometry,
    /// Horizontal advance in world units.
    pub advance: f32,
}

/// One ring of the side wall: the outline at depth `z`, pushed outward by
/// `outset` world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRing {
    pub z: f32,
    pub outset: f32,
}

/// Straight walls from `back` to `front` with no bevel.
pub fn straight_walls(back: f32, front: f32) -> Vec<WallRing> {
    vec![
        WallRing { z: back, outset: 0.0 },
        WallRing { z: front, outset: 0.0 },
    ]
}

/// Wall rings for `options`, ordered back to front.
///
/// The first and last ring sit on the caps with no outset. Between them the
/// bevel follows a quarter circle out to `bevel_size`, then the body runs
/// straight from `z = 0` to `z = height`.
pub fn wall_rings(options: &FontOptions) -> Vec<WallRing> {
    let (back, front) = options.depth_range();
    let segments = options.bevel_segments;
    if !options.bevel_enabled || segments == 0 {
        return straight_walls(back, front);
    }

    let bevel = |step: u32| {
        let t = step as f32 / segments as f32 * FRAC_PI_2;
        (options.bevel_thickness * t.cos(), options.bevel_size * t.sin())
    };

    let mut rings = Vec::with_capacity(2 * segments as usize + 2);
    for step in 0..segments {
        let (dz, outset) = bevel(step);
        rings.push(WallRing { z: -dz, outset });
    }
    rings.push(WallRing {
        z: 0.0,
        outset: options.bevel_size,
    });
    rings.push(WallRing {
        z: options.height,
        outset: options.bevel_size,
    });
    for step in (0..segments).rev() {
        let (dz, outset) = bevel(step);
        rings.push(WallRing {
            z: options.height + dz,
            outset,
        });
    }
    rings
}

/// Extrude `ch` from `typeface` with the given options.
///
/// Glyphs without an outline (spaces) and characters the font lacks
/// entirely come back as empty geometry whose bounding box spans the
/// advance, so callers always get a usable width.
pub fn extrude_glyph(
    typeface: &Typeface,
    ch: char,
    options: &FontOptions,
) -> Result<GlyphMesh, MenuError> {
    let scale = typeface.scale(options.size);
    let (back, front) = options.depth_range();

    let Some(glyph) = typeface.glyph(ch) else {
        log::warn!("No glyph for {ch:?} and no fallback, using empty geometry");
        return Ok(GlyphMesh {
            ch,
            geometry: Geometry::empty(),
            advance: 0.0,
        });
    };
    let advance = glyph.ha * scale;

    let contours = match glyph.o.as_deref() {
        Some(outline) => {
            let commands = parse_outline(ch, outline)?;
            flatten_outline(&commands, scale, options.curve_segments)
        }
        None => Vec::new(),
    };

    let geometry = if contours.is_empty() {
        Geometry::empty().with_bounding_box(Aabb {
            min: Vec3::new(0.0, 0.0, back),
            max: Vec3::new(advance, 0.0, front),
        })
    } else {
        extrude_contours(ch, &contours, &wall_rings(options))?
    };

    Ok(GlyphMesh {
        ch,
        geometry,
        advance,
    })
}

/// Extrude closed 2D contours through `rings` along Z.
///
/// Caps are placed on the first and last ring, which must not be outset.
pub fn extrude_contours(
    glyph: char,
    contours: &[Contour],
    rings: &[WallRing],
) -> Result<Geometry, MenuError> {
    let (Some(back), Some(front)) = (rings.first(), rings.last()) else {
        return Err(MenuError::InvalidOutline {
            glyph,
            reason: "extrusion needs at least one wall ring".into(),
        });
    };
    let (back, front) = (back.z, front.z);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let cap = tessellate_cap(glyph, contours)?;

    // Front cap faces +Z, back cap faces -Z with reversed winding.
    let base = vertices.len() as u32;
    vertices.extend(
        cap.vertices
            .iter()
            .map(|p| MeshVertex::new(Vec3::new(p[0], p[1], front), Vec3::Z)),
    );
    indices.extend(cap.indices.iter().map(|i| base + i));

    let base = vertices.len() as u32;
    vertices.extend(
        cap.vertices
            .iter()
            .map(|p| MeshVertex::new(Vec3::new(p[0], p[1], back), Vec3::NEG_Z)),
    );
    for tri in cap.indices.chunks_exact(3) {
        indices.extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
    }

    // Outer contours decide which side of an edge is outside: filled area is
    // on the left of counter-clockwise outers and on the right of clockwise
    // ones. Holes are wound the other way, so one sign covers every contour.
    let outer_is_ccw = contours
        .iter()
        .map(|c| signed_area(c))
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .is_none_or(|area| area >= 0.0);

    for contour in contours {
        let outsets = vertex_outsets(contour, outer_is_ccw);
        let at = |k: usize, ring: &WallRing| {
            (contour[k] + outsets[k] * ring.outset).extend(ring.z)
        };

        for i in 0..contour.len() {
            let j = (i + 1) % contour.len();
            // Walk each edge so its outside is on the right.
            let (p, q) = if outer_is_ccw { (i, j) } else { (j, i) };
            for pair in rings.windows(2) {
                let (lo, hi) = (&pair[0], &pair[1]);
                push_quad(
                    &mut vertices,
                    &mut indices,
                    [at(p, lo), at(q, lo), at(q, hi), at(p, hi)],
                );
            }
        }
    }

    Ok(Geometry::new(vertices, indices))
}

/// Outward offset per contour vertex for a unit bevel.
///
/// Each offset is the miter of the two neighbouring edge normals, so both
/// edges move out by exactly one unit. Sharp corners are capped at `√2`.
fn vertex_outsets(contour: &[Vec2], outer_is_ccw: bool) -> Vec<Vec2> {
    let n = contour.len();
    let edge_normal = |i: usize| {
        let d = (contour[(i + 1) % n] - contour[i]).normalize_or_zero();
        let right = Vec2::new(d.y, -d.x);
        if outer_is_ccw { right } else { -right }
    };

    (0..n)
        .map(|i| {
            let prev = edge_normal((i + n - 1) % n);
            let next = edge_normal(i);
            let denom = 1.0 + prev.dot(next);
            if denom < 1e-4 {
                return next;
            }
            let miter = (prev + next) / denom;
            if miter.length_squared() > 2.0 {
                miter.normalize() * SQRT_2
            } else {
                miter
            }
        })
        .collect()
}

/// Flat-shaded quad wound counter-clockwise when seen from outside.
fn push_quad(vertices: &mut Vec<MeshVertex>, indices: &mut Vec<u32>, corners: [Vec3; 4]) {
    let [a, b, c, d] = corners;
    // Cross of the diagonals; bevel quads can be slightly non-planar.
    let normal = (c - a).cross(d - b).normalize_or_zero();
    if normal == Vec3::ZERO {
        return;
    }

    let base = vertices.len() as u32;
    vertices.extend(corners.map(|p| MeshVertex::new(p, normal)));
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Fill the glyph's contours, returning counter-clockwise triangles.
fn tessellate_cap(
    glyph: char,
    contours: &[Contour],
) -> Result<VertexBuffers<[f32; 2], u32>, MenuError> {
    let mut builder = Path::builder();
    for contour in contours {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                vertex.position().to_array()
            }),
        )
        .map_err(|e| MenuError::InvalidOutline {
            glyph,
            reason: format!("tessellation failed: {e:?}"),
        })?;

    for tri in buffers.indices.chunks_exact_mut(3) {
        let [a, b, c] =
            [tri[0], tri[1], tri[2]].map(|i| Vec2::from_array(buffers.vertices[i as usize]));
        if (b - a).perp_dot(c - a) < 0.0 {
            tri.swap(1, 2);
        }
    }

    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"{
        "glyphs": {
            "I": { "ha": 500, "o": "m 100 0 l 400 0 l 400 1000 l 100 1000 z " },
            "O": { "ha": 1000, "o": "m 0 0 l 1000 0 l 1000 1000 l 0 1000 z m 250 250 l 250 750 l 750 750 l 750 250 z " },
            "W": { "ha": 1000, "o": "m 0 0 l 0 1000 l 1000 1000 l 1000 0 z " },
            "?": { "ha": 400, "o": "m 0 0 l 400 0 l 400 400 z " },
            " ": { "ha": 600 }
        },
        "familyName": "Test Block",
        "resolution": 1000
    }"#;

    fn font() -> Typeface {
        Typeface::from_json(FONT).unwrap()
    }

    fn options() -> FontOptions {
        FontOptions::default()
    }

    fn flat() -> FontOptions {
        FontOptions {
            bevel_enabled: false,
            ..FontOptions::default()
        }
    }

    /// Every triangle's winding agrees with its vertex normal.
    fn assert_outward(geometry: &Geometry) {
        for index in 0..geometry.triangle_count() {
            let [a, b, c] = geometry.triangle(index).unwrap();
            let face = (b.position() - a.position()).cross(c.position() - a.position());
            assert!(
                face.dot(a.normal()) > 0.0,
                "triangle {index} winds against its normal"
            );
        }
    }

    #[test]
    fn test_bar_bounding_box() {
        let mesh = extrude_glyph(&font(), 'I', &flat()).unwrap();
        let bbox = mesh.geometry.bounding_box();
        assert!((bbox.min - Vec3::new(0.4, 0.0, 0.0)).length() < 1e-5);
        assert!((bbox.max - Vec3::new(1.6, 4.0, 0.4)).length() < 1e-5);
        assert!((mesh.advance - 2.0).abs() < 1e-6);
        // 2 cap triangles per side plus 4 side quads.
        assert_eq!(mesh.geometry.triangle_count(), 2 + 2 + 8);
    }

    #[test]
    fn test_bevel_grows_outline() {
        let font = font();
        let flat_box = extrude_glyph(&font, 'I', &flat()).unwrap().geometry.bounding_box();
        let bevelled = extrude_glyph(&font, 'I', &options()).unwrap();
        let bbox = bevelled.geometry.bounding_box();

        let grown = bbox.size() - flat_box.size();
        assert!((grown.x - 0.6).abs() < 1e-5, "x grew by {}", grown.x);
        assert!((grown.y - 0.6).abs() < 1e-5, "y grew by {}", grown.y);
        assert!((bbox.min - Vec3::new(0.1, -0.3, -0.35)).length() < 1e-5);
        assert!((bbox.max - Vec3::new(1.9, 4.3, 0.75)).length() < 1e-5);
        // Advance is a font metric and ignores the bevel.
        assert!((bevelled.advance - 2.0).abs() < 1e-6);
        // 4 bevel steps per side plus the body: 9 bands of 4 quads.
        assert_eq!(bevelled.geometry.triangle_count(), 2 + 2 + 9 * 4 * 2);
    }

    #[test]
    fn test_wall_rings_run_cap_to_cap() {
        let rings = wall_rings(&options());
        assert_eq!(rings.len(), 10);
        assert_eq!(rings[0], WallRing { z: -0.35, outset: 0.0 });
        assert!((rings[9].z - 0.75).abs() < 1e-6);
        assert!(rings[9].outset.abs() < 1e-6);
        assert_eq!(rings[4], WallRing { z: 0.0, outset: 0.3 });
        assert_eq!(rings[5], WallRing { z: 0.4, outset: 0.3 });
        assert!(rings.windows(2).all(|w| w[0].z < w[1].z));

        assert_eq!(wall_rings(&flat()), straight_walls(0.0, 0.4));
    }

    #[test]
    fn test_windings_match_normals() {
        let font = font();
        for options in [options(), flat()] {
            for ch in ['I', 'O', 'W', '?'] {
                let mesh = extrude_glyph(&font, ch, &options).unwrap();
                assert_outward(&mesh.geometry);
            }
        }
    }

    #[test]
    fn test_bevel_narrows_holes() {
        let mesh = extrude_glyph(&font(), 'O', &options()).unwrap();
        // The hole spans 1.0..3.0 before the bevel eats 0.3 from each side.
        let ray = crate::physics::Ray::new(Vec3::new(2.0, 2.0, 0.2), Vec3::NEG_X);
        let hit = mesh.geometry.raycast(&ray).unwrap();
        assert!((hit.point.x - 1.3).abs() < 1e-4, "hole wall at {}", hit.point.x);
    }

    #[test]
    fn test_hole_walls_point_into_the_hole() {
        let mesh = extrude_glyph(&font(), 'O', &flat()).unwrap();
        let g = &mesh.geometry;
        // Inner wall at x = 1.0 (250 font units) must face +X, into the hole.
        let inner = (0..g.triangle_count())
            .filter_map(|i| g.triangle(i))
            .find(|[a, b, _]| {
                (a.position().x - 1.0).abs() < 1e-5 && (b.position().x - 1.0).abs() < 1e-5
                    && a.normal().z == 0.0
            })
            .unwrap();
        assert!((inner[0].normal() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_hole_is_not_filled() {
        let mesh = extrude_glyph(&font(), 'O', &options()).unwrap();
        let ray = crate::physics::Ray::new(Vec3::new(2.0, 2.0, 10.0), Vec3::NEG_Z);
        assert!(mesh.geometry.raycast(&ray).is_none());
        let ray = crate::physics::Ray::new(Vec3::new(0.5, 0.5, 10.0), Vec3::NEG_Z);
        assert!(mesh.geometry.raycast(&ray).is_some());
    }

    #[test]
    fn test_space_spans_advance() {
        let mesh = extrude_glyph(&font(), ' ', &options()).unwrap();
        assert!(mesh.geometry.is_empty());
        assert!((mesh.geometry.bounding_box().size().x - 2.4).abs() < 1e-5);
    }

    #[test]
    fn test_missing_glyph_uses_fallback() {
        let mesh = extrude_glyph(&font(), 'Z', &options()).unwrap();
        assert!((mesh.advance - 1.6).abs() < 1e-6);
        assert!(!mesh.geometry.is_empty());
    }

    #[test]
    fn test_empty_rings_are_an_error() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let err = extrude_contours('#', &[square], &[]).unwrap_err();
        assert!(matches!(err, MenuError::InvalidOutline { glyph: '#', .. }));
    }

    #[test]
    fn test_bad_outline_is_an_error() {
        let font = Typeface::from_json(
            r#"{ "glyphs": { "X": { "ha": 10, "o": "m 0 0 k 1 1" } }, "resolution": 10 }"#,
        )
        .unwrap();
        let err = extrude_glyph(&font, 'X', &options()).unwrap_err();
        assert!(matches!(err, MenuError::InvalidOutline { glyph: 'X', .. }));
    }
}

//! Glyph outline parsing and flattening.
//!
//! Outline strings are whitespace separated commands in font units:
//!
//! ```text
//! m x y                  move to
//! l x y                  line to
//! q x y cx cy            quadratic curve, end point first
//! b x y c1x c1y c2x c2y  cubic curve, end point first
//! z                      close (optional, contours are always closed)
//! ```

use glam::Vec2;

use crate::error::MenuError;

/// One parsed outline command, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Close,
}

/// A closed polygon (the closing edge is implicit).
pub type Contour = Vec<Vec2>;

/// Parse an outline command string.
pub fn parse_outline(glyph: char, outline: &str) -> Result<Vec<OutlineCommand>, MenuError> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    let next_point = |tokens: &mut std::str::SplitWhitespace<'_>,
                      op: &str|
     -> Result<Vec2, MenuError> {
        let mut coord = || -> Result<f32, MenuError> {
            let token = tokens.next().ok_or_else(|| MenuError::InvalidOutline {
                glyph,
                reason: format!("'{op}' is missing coordinates"),
            })?;
            token.parse::<f32>().map_err(|_| MenuError::InvalidOutline {
                glyph,
                reason: format!("'{token}' is not a number"),
            })
        };
        Ok(Vec2::new(coord()?, coord()?))
    };

    while let Some(op) = tokens.next() {
        let command = match op {
            "m" => OutlineCommand::MoveTo(next_point(&mut tokens, op)?),
            "l" => OutlineCommand::LineTo(next_point(&mut tokens, op)?),
            "q" => {
                let to = next_point(&mut tokens, op)?;
                let ctrl = next_point(&mut tokens, op)?;
                OutlineCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = next_point(&mut tokens, op)?;
                let ctrl1 = next_point(&mut tokens, op)?;
                let ctrl2 = next_point(&mut tokens, op)?;
                OutlineCommand::CubicTo { ctrl1, ctrl2, to }
            }
            "z" => OutlineCommand::Close,
            other => {
                return Err(MenuError::InvalidOutline {
                    glyph,
                    reason: format!("unknown command '{other}'"),
                });
            }
        };
        commands.push(command);
    }

    Ok(commands)
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k) + p1 * (2.0 * k * t) + p2 * (t * t)
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k * k) + p1 * (3.0 * k * k * t) + p2 * (3.0 * k * t * t) + p3 * (t * t * t)
}

fn push_point(contour: &mut Contour, p: Vec2) {
    if contour.last().is_none_or(|last| last.distance_squared(p) > 1e-12) {
        contour.push(p);
    }
}

fn finish_contour(contours: &mut Vec<Contour>, mut contour: Contour) {
    // Drop the explicit closing point, the closing edge is implicit.
    if contour.len() > 1
        && contour[0].distance_squared(contour[contour.len() - 1]) <= 1e-12
    {
        contour.pop();
    }
    if contour.len() >= 3 {
        contours.push(contour);
    }
}

/// Flatten commands into contours, scaling font units by `scale`.
///
/// Every curve is split into `curve_segments` straight segments. Contours
/// with fewer than three distinct points are dropped.
pub fn flatten_outline(
    commands: &[OutlineCommand],
    scale: f32,
    curve_segments: u32,
) -> Vec<Contour> {
    let segments = curve_segments.max(1);
    let mut contours = Vec::new();
    let mut current: Contour = Vec::new();
    let mut cursor = Vec2::ZERO;

    for command in commands {
        match *command {
            OutlineCommand::MoveTo(p) => {
                finish_contour(&mut contours, std::mem::take(&mut current));
                cursor = p * scale;
                current.push(cursor);
            }
            OutlineCommand::LineTo(p) => {
                cursor = p * scale;
                push_point(&mut current, cursor);
            }
            OutlineCommand::QuadTo { ctrl, to } => {
                let (p0, p1, p2) = (cursor, ctrl * scale, to * scale);
                for i in 1..=segments {
                    push_point(&mut current, quadratic(p0, p1, p2, i as f32 / segments as f32));
                }
                cursor = p2;
            }
            OutlineCommand::CubicTo { ctrl1, ctrl2, to } => {
                let (p0, p1, p2, p3) = (cursor, ctrl1 * scale, ctrl2 * scale, to * scale);
                for i in 1..=segments {
                    push_point(
                        &mut current,
                        cubic(p0, p1, p2, p3, i as f32 / segments as f32),
                    );
                }
                cursor = p3;
            }
            OutlineCommand::Close => {
                finish_contour(&mut contours, std::mem::take(&mut current));
            }
        }
    }
    finish_contour(&mut contours, current);

    contours
}

/// Shoelace signed area; positive for counter-clockwise contours.
pub fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        let cmds = parse_outline('x', "m 0 0 l 10 0 q 10 10 20 5 b 0 10 5 20 0 15 z").unwrap();
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], OutlineCommand::MoveTo(Vec2::ZERO));
        assert_eq!(
            cmds[2],
            OutlineCommand::QuadTo {
                ctrl: Vec2::new(20.0, 5.0),
                to: Vec2::new(10.0, 10.0)
            }
        );
        assert_eq!(
            cmds[3],
            OutlineCommand::CubicTo {
                ctrl1: Vec2::new(5.0, 20.0),
                ctrl2: Vec2::new(0.0, 15.0),
                to: Vec2::new(0.0, 10.0)
            }
        );
        assert_eq!(cmds[4], OutlineCommand::Close);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_outline('x', "m 0 zero").is_err());
        assert!(parse_outline('x', "m 0").is_err());
        assert!(parse_outline('x', "w 1 2").is_err());
    }

    #[test]
    fn test_flatten_square_scales_and_drops_closing_point() {
        let cmds = parse_outline('x', "m 0 0 l 100 0 l 100 100 l 0 100 l 0 0").unwrap();
        let contours = flatten_outline(&cmds, 0.01, 5);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert_eq!(contours[0][2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_flatten_curve_uses_segment_count() {
        let cmds = parse_outline('x', "m 0 0 q 10 0 5 10 l 5 -5").unwrap();
        let contours = flatten_outline(&cmds, 1.0, 4);
        // start + 4 curve points + line end
        assert_eq!(contours[0].len(), 6);
        assert_eq!(contours[0][4], Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_multiple_contours() {
        let cmds = parse_outline(
            'o',
            "m 0 0 l 10 0 l 10 10 l 0 10 z m 3 3 l 3 7 l 7 7 l 7 3 z",
        )
        .unwrap();
        let contours = flatten_outline(&cmds, 1.0, 1);
        assert_eq!(contours.len(), 2);
        assert!(signed_area(&contours[0]) > 0.0);
        assert!(signed_area(&contours[1]) < 0.0);
    }

    #[test]
    fn test_degenerate_contour_dropped() {
        let cmds = parse_outline('x', "m 0 0 l 1 1 z").unwrap();
        assert!(flatten_outline(&cmds, 1.0, 5).is_empty());
    }
}

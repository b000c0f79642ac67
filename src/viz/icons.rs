//! Pictogram glyphs. Each icon is drawn in a unit box centred on the origin
//! and placed with a `translate(x, y) scale(size)` group.

use super::node::{Node, Transform};
use super::palette::{Fill, Rgb8};

/// Draws one icon of a pictogram bar.
pub trait IconRenderer {
    fn draw(&self, x: f64, y: f64, size: f64) -> Node;
}

/// A banknote: solid frame, translucent face, solid oval in the middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyIcon {
    pub color: Rgb8,
}

impl IconRenderer for MoneyIcon {
    fn draw(&self, x: f64, y: f64, size: f64) -> Node {
        let solid = Fill::solid(self.color);
        Node::group(
            Transform::translate_scale(x, y, size),
            vec![
                Node::rect(-0.4, -0.2, 0.8, 0.4, solid.with_opacity(0.5)),
                // frame: outer 1.0 × 0.6, inner 0.8 × 0.4
                Node::rect(-0.5, -0.3, 1.0, 0.1, solid),
                Node::rect(-0.5, 0.2, 1.0, 0.1, solid),
                Node::rect(-0.5, -0.2, 0.1, 0.4, solid),
                Node::rect(0.4, -0.2, 0.1, 0.4, solid),
                Node::ellipse(0.0, 0.0, 0.15, 0.2, solid),
            ],
        )
    }
}

/// A bust: rounded shoulders with a translucent head above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonIcon {
    pub color: Rgb8,
}

const CURVE_STEPS: usize = 8;

fn quad_bezier(p0: (f64, f64), c: (f64, f64), p1: (f64, f64), out: &mut Vec<(f64, f64)>) {
    for step in 1..=CURVE_STEPS {
        let t = step as f64 / CURVE_STEPS as f64;
        let u = 1.0 - t;
        out.push((
            u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p1.0,
            u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p1.1,
        ));
    }
}

/// Shoulder outline: from the neck out to the right shoulder, down, across, and back up.
fn body_outline() -> Vec<(f64, f64)> {
    let mut points = vec![(0.0, 0.0)];
    quad_bezier((0.0, 0.0), (0.4, 0.0), (0.4, 0.4), &mut points);
    points.push((0.4, 0.5));
    points.push((-0.4, 0.5));
    points.push((-0.4, 0.4));
    quad_bezier((-0.4, 0.4), (-0.4, 0.0), (0.0, 0.0), &mut points);
    points.pop(); // closing point repeats the start
    points
}

impl IconRenderer for PersonIcon {
    fn draw(&self, x: f64, y: f64, size: f64) -> Node {
        let solid = Fill::solid(self.color);
        Node::group(
            Transform::translate_scale(x, y, size),
            vec![
                Node::polygon(body_outline(), solid),
                Node::ellipse(0.0, -0.3, 0.2, 0.2, solid.with_opacity(0.55)),
            ],
        )
    }
}

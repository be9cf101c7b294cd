//! Pure geometry for the shape tools.
//!
//! Every function here maps pointer positions to a [`Shape`] without touching
//! any pixels; the [`Surface`](crate::surface::Surface) rasterizes the result.

use egui::{Pos2, Rect, Vec2, pos2, vec2};

/// Height of an equilateral triangle relative to its edge length
const EQUILATERAL_HEIGHT: f32 = 0.866_025_4; // sqrt(3) / 2

/// A single raster draw call produced by a shape tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Round-capped line segment
    Segment { from: Pos2, to: Pos2 },
    /// Axis-aligned rectangle outline
    Rectangle(Rect),
    /// Circle outline
    Circle { center: Pos2, radius: f32 },
    /// Closed triangle outline
    Triangle([Pos2; 3]),
}

impl Shape {
    /// Bounding box of the stroked outline, padded by the full line width.
    pub fn bounds(&self, line_width: f32) -> Rect {
        let pad = line_width.max(0.0);
        let rect = match *self {
            Shape::Segment { from, to } => Rect::from_two_pos(from, to),
            Shape::Rectangle(rect) => rect,
            Shape::Circle { center, radius } => {
                Rect::from_center_size(center, Vec2::splat(radius * 2.0))
            }
            Shape::Triangle(vertices) => Rect::from_points(&vertices),
        };
        rect.expand(pad)
    }
}

/// Straight line from `from` to `to`.
///
/// With `constrain` set the line snaps to whichever axis has the larger
/// absolute delta from `from`; a tie snaps horizontally.
pub fn line(from: Pos2, to: Pos2, constrain: bool) -> Shape {
    let to = if constrain {
        let delta = to - from;
        if delta.x.abs() >= delta.y.abs() {
            pos2(to.x, from.y)
        } else {
            pos2(from.x, to.y)
        }
    } else {
        to
    };
    Shape::Segment { from, to }
}

/// Axis-aligned rectangle spanning two opposite corners in any order.
pub fn rectangle(a: Pos2, b: Pos2) -> Shape {
    Shape::Rectangle(Rect::from_two_pos(a, b))
}

pub fn circle(center: Pos2, radius: f32) -> Shape {
    Shape::Circle {
        center,
        radius: radius.abs(),
    }
}

/// Circle centered on `center` whose outline passes through `edge`.
pub fn circle_through(center: Pos2, edge: Pos2) -> Shape {
    circle(center, center.distance(edge))
}

/// Equilateral triangle with `a`→`b` as one edge.
///
/// The third vertex sits on the side the vector `(-dy, dx)` points to. In
/// screen coordinates (y grows downward) an edge drawn left to right gets
/// its apex below the edge: `(0,0)`→`(10,0)` yields `(5, 5√3)`.
pub fn equilateral_triangle(a: Pos2, b: Pos2) -> Shape {
    Shape::Triangle([a, b, third_vertex(a, b)])
}

fn third_vertex(a: Pos2, b: Pos2) -> Pos2 {
    let edge = b - a;
    let midpoint = a + edge * 0.5;
    midpoint + vec2(-edge.y, edge.x) * EQUILATERAL_HEIGHT
}

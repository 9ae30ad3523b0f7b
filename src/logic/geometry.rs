// src/logic/geometry.rs
//! Integer segment intersection on the game grid.
//!
//! Cross products are taken in `i128`, so any pair of `i64` coordinates is
//! handled without overflow.

use crate::components::line_segment::LineSegment;
use crate::components::position::Position2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Turn direction of `p -> q -> r`.
pub fn orientation(p: Position2D, q: Position2D, r: Position2D) -> Orientation {
    let cross = (q.x as i128 - p.x as i128) * (r.y as i128 - p.y as i128)
        - (q.y as i128 - p.y as i128) * (r.x as i128 - p.x as i128);
    match cross.signum() {
        0 => Orientation::Colinear,
        1 => Orientation::CounterClockwise,
        _ => Orientation::Clockwise,
    }
}

/// For colinear `p`, `q`, `r`: whether `q` lies within the bounding box of `p..r`.
fn on_segment(p: Position2D, q: Position2D, r: Position2D) -> bool {
    q.x >= p.x.min(r.x) && q.x <= p.x.max(r.x) && q.y >= p.y.min(r.y) && q.y <= p.y.max(r.y)
}

/// Whether the two closed segments share at least one point. Touching an
/// endpoint counts; colinear segments only count if they actually overlap.
pub fn segments_intersect(a: &LineSegment, b: &LineSegment) -> bool {
    let (p1, q1) = (a.start(), a.end());
    let (p2, q2) = (b.start(), b.end());

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Colinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Colinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Colinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Colinear && on_segment(p2, q1, q2))
}

/// Whether the move `from -> to` touches any of `lines`.
pub fn path_crosses_any(from: Position2D, to: Position2D, lines: &[LineSegment]) -> bool {
    let path = LineSegment::between(from, to);
    lines.iter().any(|line| segments_intersect(&path, line))
}

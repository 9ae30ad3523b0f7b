// src/components/line_segment.rs

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::components::position::Position2D;
use crate::ecs::component::Component;
use crate::protocol::ModuleId;

/// A straight wall or checkpoint line between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl LineSegment {
    pub const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn between(from: Position2D, to: Position2D) -> Self {
        Self { x1: from.x, y1: from.y, x2: to.x, y2: to.y }
    }

    pub fn start(&self) -> Position2D {
        Position2D::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Position2D {
        Position2D::new(self.x2, self.y2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    /// Consecutive segments through `points`.
    pub fn polyline(points: &[(i64, i64)]) -> Vec<LineSegment> {
        points
            .iter()
            .tuple_windows()
            .map(|(&(x1, y1), &(x2, y2))| LineSegment::new(x1, y1, x2, y2))
            .collect()
    }

    /// Like [`LineSegment::polyline`], plus a segment closing the last point back to the first.
    pub fn polygon(points: &[(i64, i64)]) -> Vec<LineSegment> {
        points
            .iter()
            .circular_tuple_windows()
            .map(|(&(x1, y1), &(x2, y2))| LineSegment::new(x1, y1, x2, y2))
            .collect()
    }
}

impl Component for LineSegment {
    const ID: ModuleId = ModuleId::from_static("race.components.LineSegment2D");
}

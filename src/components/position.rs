// src/components/position.rs

use serde::{Deserialize, Serialize};

use crate::components::velocity::Velocity2D;
use crate::ecs::component::Component;
use crate::protocol::ModuleId;

/// Grid cell a player occupies. The grid is unbounded in every direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position2D {
    pub x: i64,
    pub y: i64,
}

impl Position2D {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// One integration step: the cell reached after travelling `velocity` for one turn.
    pub fn step(self, velocity: Velocity2D) -> Self {
        Self { x: self.x + velocity.vx, y: self.y + velocity.vy }
    }
}

impl From<(i64, i64)> for Position2D {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl Component for Position2D {
    const ID: ModuleId = ModuleId::from_static("race.components.Position2D");
}

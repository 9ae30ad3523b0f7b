// src/components/velocity.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::protocol::ModuleId;

/// Cells travelled per turn on each axis. Not capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity2D {
    pub vx: i64,
    pub vy: i64,
}

impl Velocity2D {
    pub fn accelerate(self, dvx: i64, dvy: i64) -> Self {
        Self { vx: self.vx + dvx, vy: self.vy + dvy }
    }
}

impl Component for Velocity2D {
    const ID: ModuleId = ModuleId::from_static("race.components.Velocity2D");
}

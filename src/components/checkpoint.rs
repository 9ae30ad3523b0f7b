// src/components/checkpoint.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::protocol::ModuleId;

/// A waypoint made of one or more lines. Each entry is an entity carrying a
/// [`LineSegment`](crate::components::line_segment::LineSegment).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub lines: Vec<Entity>,
}

impl Component for Checkpoint {
    const ID: ModuleId = ModuleId::from_static("race.components.Checkpoint");
}

// src/components/track.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::protocol::ModuleId;

/// Course geometry. `lines` point at boundary [`LineSegment`] entities and
/// `checkpoints` at [`Checkpoint`] entities, both in the order they were
/// submitted. Never modified after creation.
///
/// [`LineSegment`]: crate::components::line_segment::LineSegment
/// [`Checkpoint`]: crate::components::checkpoint::Checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    pub lines: Vec<Entity>,
    pub checkpoints: Vec<Entity>,
}

impl Component for Track {
    const ID: ModuleId = ModuleId::from_static("race.components.Track");
}

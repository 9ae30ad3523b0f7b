// src/components/progress.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::protocol::ModuleId;

/// How far one player got along the course of one race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Index of the next checkpoint that has to be crossed.
    pub next_checkpoint: u32,
    /// 1-based finishing rank, once the last checkpoint was crossed.
    pub finished_rank: Option<u32>,
}

impl PlayerProgress {
    pub fn is_finished(&self) -> bool {
        self.finished_rank.is_some()
    }
}

impl Component for PlayerProgress {
    const ID: ModuleId = ModuleId::from_static("race.components.PlayerProgress");
}

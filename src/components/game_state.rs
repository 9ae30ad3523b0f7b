// src/components/game_state.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::protocol::{ModuleId, RaceId, TrackId};

/// World-wide bookkeeping, attached to the `EntityKey::Singleton` entity.
///
/// Ids are handed out from these counters so they stay monotonic and a
/// rolled-back transaction gives its id back along with everything else.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameCounters {
    pub last_race_id: u64,
    pub last_track_id: u64,
}

impl GameCounters {
    pub fn next_race_id(&mut self) -> RaceId {
        self.last_race_id += 1;
        RaceId(self.last_race_id)
    }

    pub fn next_track_id(&mut self) -> TrackId {
        self.last_track_id += 1;
        TrackId(self.last_track_id)
    }
}

impl Component for GameCounters {
    const ID: ModuleId = ModuleId::from_static("race.components.GameCounters");
}

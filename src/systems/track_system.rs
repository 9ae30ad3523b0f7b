// src/systems/track_system.rs

use log::info;

use super::context::SystemContext;
use crate::components::checkpoint::Checkpoint;
use crate::components::line_segment::LineSegment;
use crate::components::track::Track;
use crate::ecs::entity::{Entity, EntityKey};
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::protocol::{CheckpointSpec, Identity, ModuleId, TrackId, TrackSpec, TrackView};
use crate::registry::Role;

/// Stores course geometry. Tracks are immutable once created.
#[derive(Debug, Clone, Copy)]
pub struct TrackSystem {
    address: Identity,
}

impl TrackSystem {
    pub const ID: ModuleId = ModuleId::from_static("race.systems.TrackSystem");

    pub fn new(address: Identity) -> Self {
        Self { address }
    }

    /// Stores `spec` as a new track. Only managers may create tracks. A track
    /// needs at least one checkpoint, and every checkpoint at least one line
    /// of non-zero length.
    pub fn create_track(
        &self,
        ctx: &mut SystemContext<'_>,
        caller: Identity,
        spec: TrackSpec,
    ) -> Result<TrackId, GameError> {
        ctx.require_active(self)?;
        ctx.authority().require_role(Role::Manager, caller)?;
        validate_track(&spec)?;

        let track_id = ctx.update_counters(self, |counters| counters.next_track_id())?;

        let mut track = Track::default();
        for (index, line) in spec.lines.iter().enumerate() {
            let entity = ctx.spawn_keyed(EntityKey::TrackLine { track: track_id, index: index as u32 });
            ctx.write(self, entity, *line)?;
            track.lines.push(entity);
        }
        for (cp_index, checkpoint) in spec.checkpoints.iter().enumerate() {
            let cp_index = cp_index as u32;
            let mut lines = Vec::with_capacity(checkpoint.lines.len());
            for (index, line) in checkpoint.lines.iter().enumerate() {
                let entity = ctx.spawn_keyed(EntityKey::CheckpointLine {
                    track: track_id,
                    checkpoint: cp_index,
                    index: index as u32,
                });
                ctx.write(self, entity, *line)?;
                lines.push(entity);
            }
            let entity = ctx.spawn_keyed(EntityKey::Checkpoint { track: track_id, index: cp_index });
            ctx.write(self, entity, Checkpoint { lines })?;
            track.checkpoints.push(entity);
        }

        let entity = ctx.spawn_keyed(EntityKey::Track(track_id));
        ctx.write(self, entity, track)?;
        ctx.emit(GameEvent::TrackCreated { track_id });

        info!(
            "TrackSystem: {} created by {} ({} lines, {} checkpoints)",
            track_id,
            caller,
            spec.lines.len(),
            spec.checkpoints.len()
        );
        Ok(track_id)
    }

    pub fn get_track(world: &World, track_id: TrackId) -> Result<TrackView, GameError> {
        let track = world
            .entity(&EntityKey::Track(track_id))
            .and_then(|entity| world.get_component::<Track>(entity))
            .ok_or(GameError::TrackNotFound(track_id))?;

        let checkpoints = track
            .checkpoints
            .iter()
            .map(|&entity| CheckpointSpec {
                lines: world
                    .get_component::<Checkpoint>(entity)
                    .map(|cp| lines_of(world, &cp.lines))
                    .unwrap_or_default(),
            })
            .collect();

        Ok(TrackView { id: track_id, lines: lines_of(world, &track.lines), checkpoints })
    }
}

impl System for TrackSystem {
    fn id(&self) -> ModuleId {
        Self::ID
    }

    fn address(&self) -> Identity {
        self.address
    }
}

/// Without a checkpoint nobody could ever finish, and a zero-length line can
/// only be touched at a single cell.
fn validate_track(spec: &TrackSpec) -> Result<(), GameError> {
    if spec.checkpoints.is_empty() {
        return Err(GameError::InvalidTrack("track has no checkpoints".into()));
    }
    for (index, checkpoint) in spec.checkpoints.iter().enumerate() {
        if checkpoint.lines.is_empty() {
            return Err(GameError::InvalidTrack(format!("checkpoint {index} has no lines")));
        }
        if checkpoint.lines.iter().any(LineSegment::is_degenerate) {
            return Err(GameError::InvalidTrack(format!("checkpoint {index} has a zero-length line")));
        }
    }
    Ok(())
}

fn lines_of(world: &World, entities: &[Entity]) -> Vec<LineSegment> {
    entities
        .iter()
        .filter_map(|&entity| world.get_component::<LineSegment>(entity).copied())
        .collect()
}

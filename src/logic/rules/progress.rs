// src/logic/rules/progress.rs
//! Course progress after a move.
//!
//! Movement does not know what "progress" means. After every successful move
//! it asks a [`ProgressPolicy`] and applies the returned [`ProgressUpdate`].

use crate::components::checkpoint::Checkpoint;
use crate::components::line_segment::LineSegment;
use crate::components::position::Position2D;
use crate::components::progress::PlayerProgress;
use crate::components::race::RaceState;
use crate::components::track::Track;
use crate::config::FinishRule;
use crate::ecs::entity::EntityKey;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::logic::geometry::path_crosses_any;
use crate::protocol::{Identity, TrackId};

/// One completed move, as seen by a progress policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStep {
    pub player: Identity,
    pub from: Position2D,
    pub to: Position2D,
    pub progress: PlayerProgress,
}

/// What a policy decided about a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressUpdate {
    pub progress: PlayerProgress,
    /// Checkpoint indices crossed by this step, in order.
    pub crossed: Vec<u32>,
    /// Rank the player finished with, if this step finished them.
    pub finished_rank: Option<u32>,
    pub race_finished: bool,
}

impl ProgressUpdate {
    pub fn unchanged(progress: PlayerProgress) -> Self {
        Self { progress, ..Self::default() }
    }
}

pub trait ProgressPolicy: Send + Sync {
    fn evaluate(
        &self,
        world: &World,
        race: &RaceState,
        step: &PlayerStep,
    ) -> Result<ProgressUpdate, GameError>;
}

/// Checkpoints must be crossed in stored order. Crossing the last one
/// finishes the player, and `finish_rule` decides when the race is over.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckpointProgress {
    pub finish_rule: FinishRule,
}

impl CheckpointProgress {
    pub fn new(finish_rule: FinishRule) -> Self {
        Self { finish_rule }
    }
}

impl ProgressPolicy for CheckpointProgress {
    fn evaluate(
        &self,
        world: &World,
        race: &RaceState,
        step: &PlayerStep,
    ) -> Result<ProgressUpdate, GameError> {
        let Some(track_id) = race.track else {
            return Ok(ProgressUpdate::unchanged(step.progress));
        };
        if step.progress.is_finished() {
            return Ok(ProgressUpdate::unchanged(step.progress));
        }
        let checkpoints = checkpoint_lines(world, track_id)?;
        if checkpoints.is_empty() {
            return Ok(ProgressUpdate::unchanged(step.progress));
        }

        let mut update = ProgressUpdate::unchanged(step.progress);
        // A fast move may clear several checkpoints, but only in order.
        while let Some(lines) = checkpoints.get(update.progress.next_checkpoint as usize) {
            if !path_crosses_any(step.from, step.to, lines) {
                break;
            }
            update.crossed.push(update.progress.next_checkpoint);
            update.progress.next_checkpoint += 1;
        }

        if update.progress.next_checkpoint as usize == checkpoints.len() {
            let rank = race.finish_order().len() as u32 + 1;
            update.progress.finished_rank = Some(rank);
            update.finished_rank = Some(rank);
            update.race_finished = match self.finish_rule {
                FinishRule::FirstPlayer => true,
                FinishRule::AllPlayers => rank >= race.nb_players_joined(),
            };
        }
        Ok(update)
    }
}

/// Lines of every checkpoint of `track_id`, in checkpoint order.
pub fn checkpoint_lines(world: &World, track_id: TrackId) -> Result<Vec<Vec<LineSegment>>, GameError> {
    let track = world
        .entity(&EntityKey::Track(track_id))
        .and_then(|entity| world.get_component::<Track>(entity))
        .ok_or(GameError::TrackNotFound(track_id))?;

    Ok(track
        .checkpoints
        .iter()
        .map(|&checkpoint| {
            world
                .get_component::<Checkpoint>(checkpoint)
                .map(|cp| {
                    cp.lines
                        .iter()
                        .filter_map(|&line| world.get_component::<LineSegment>(line).copied())
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect())
}

// src/app/state_getter.rs
//! Read-only snapshots of a race for front ends.

use log::debug;

use crate::clock::Timestamp;
use crate::config::GameConfig;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::protocol::{PlayerEntry, RaceId, RaceSnapshot};
use crate::systems::RaceSystem;

/// The race plus every player that has been placed on the grid. Players of a
/// race that has not started yet are listed in the race view only.
pub fn race_snapshot(
    world: &World,
    race_id: RaceId,
    now: Timestamp,
    config: &GameConfig,
) -> Result<RaceSnapshot, GameError> {
    let race = RaceSystem::get_race(world, race_id)?;
    let players = race
        .players
        .iter()
        .flatten()
        .filter_map(|&player| {
            RaceSystem::get_player_info(world, race_id, player, now, config)
                .ok()
                .map(|view| PlayerEntry { player, view })
        })
        .collect();
    Ok(RaceSnapshot { race, players })
}

pub fn race_snapshot_json(
    world: &World,
    race_id: RaceId,
    now: Timestamp,
    config: &GameConfig,
) -> Result<String, GameError> {
    let snapshot = race_snapshot(world, race_id, now, config)?;
    debug!("state: snapshot of {} with {} players", race_id, snapshot.players.len());
    serde_json::to_string(&snapshot).map_err(|e| GameError::Serialization(e.to_string()))
}

// src/systems/race_system.rs

use log::{debug, info};

use super::context::SystemContext;
use crate::clock::Timestamp;
use crate::components::energy::Energy;
use crate::components::position::Position2D;
use crate::components::progress::PlayerProgress;
use crate::components::race::{RaceState, RaceStatus};
use crate::components::track::Track;
use crate::components::velocity::Velocity2D;
use crate::config::GameConfig;
use crate::ecs::entity::{Entity, EntityKey};
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::logic::rules::available_energy;
use crate::protocol::{Identity, ModuleId, PlayerView, RaceId, RaceView, TrackId};

/// Race lifecycle: creation, joining and the automatic start.
#[derive(Debug, Clone, Copy)]
pub struct RaceSystem {
    address: Identity,
}

impl RaceSystem {
    pub const ID: ModuleId = ModuleId::from_static("race.systems.RaceSystem");

    pub fn new(address: Identity) -> Self {
        Self { address }
    }

    /// Opens a race with `nb_players` empty slots, optionally on a track.
    pub fn create_race(
        &self,
        ctx: &mut SystemContext<'_>,
        caller: Identity,
        nb_players: u32,
        track: Option<TrackId>,
    ) -> Result<RaceId, GameError> {
        ctx.require_active(self)?;

        let max = ctx.config().max_players;
        if nb_players == 0 || nb_players > max {
            return Err(GameError::InvalidPlayerCount { requested: nb_players, max });
        }
        if let Some(track_id) = track {
            if !track_exists(ctx.world(), track_id) {
                return Err(GameError::TrackNotFound(track_id));
            }
        }

        let race_id = ctx.update_counters(self, |counters| counters.next_race_id())?;
        let entity = ctx.spawn_keyed(EntityKey::Race(race_id));
        ctx.write(self, entity, RaceState::new(race_id, caller, nb_players, track))?;
        ctx.emit(GameEvent::RaceCreated { race_id, creator: caller });

        info!("RaceSystem: {} created by {} for {} players", race_id, caller, nb_players);
        Ok(race_id)
    }

    /// Puts `caller` into the next free slot. The join that fills the last
    /// slot also starts the race and places every player on the start cell.
    /// Returns whether the race started.
    pub fn join_race(
        &self,
        ctx: &mut SystemContext<'_>,
        caller: Identity,
        race_id: RaceId,
    ) -> Result<bool, GameError> {
        ctx.require_active(self)?;

        let (entity, race) = race_entry(ctx.world(), race_id)?;
        let mut race = race.clone();
        let slot = race.take_slot(caller)?;
        ctx.emit(GameEvent::PlayerJoined { race_id, player: caller });
        debug!("RaceSystem: {} took slot {} in {}", caller, slot, race_id);

        let started = race.is_full();
        if started {
            race.advance(RaceStatus::Started)?;
            let players: Vec<Identity> = race.joined_players().collect();
            for player in players {
                self.place_on_start(ctx, race_id, player)?;
            }
            ctx.emit(GameEvent::RaceStarted { race_id });
            info!("RaceSystem: {} started with {} players", race_id, race.nb_players());
        }

        ctx.write(self, entity, race)?;
        Ok(started)
    }

    fn place_on_start(
        &self,
        ctx: &mut SystemContext<'_>,
        race: RaceId,
        player: Identity,
    ) -> Result<(), GameError> {
        let start = Position2D::from(ctx.config().start_cell);
        let energy = Energy::full(ctx.config().max_energy, ctx.now());
        let entity = ctx.spawn_keyed(EntityKey::RacePlayer { race, player });
        ctx.write(self, entity, start)?;
        ctx.write(self, entity, Velocity2D::default())?;
        ctx.write(self, entity, energy)?;
        ctx.write(self, entity, PlayerProgress::default())?;
        Ok(())
    }

    // --- Reads ---

    pub fn get_race(world: &World, race_id: RaceId) -> Result<RaceView, GameError> {
        race_entry(world, race_id).map(|(_, race)| race.view())
    }

    /// State of `player` in a started race, with energy regenerated up to `now`.
    pub fn get_player_info(
        world: &World,
        race_id: RaceId,
        player: Identity,
        now: Timestamp,
        config: &GameConfig,
    ) -> Result<PlayerView, GameError> {
        let (_, race) = race_entry(world, race_id)?;
        if !race.has_joined(player) {
            return Err(GameError::PlayerNotJoined { race: race_id, player });
        }
        let entity = world
            .entity(&EntityKey::RacePlayer { race: race_id, player })
            .ok_or(GameError::RaceNotStarted(race_id))?;

        let position = world.get_component::<Position2D>(entity).copied().unwrap_or_default();
        let velocity = world.get_component::<Velocity2D>(entity).copied().unwrap_or_default();
        let progress = world.get_component::<PlayerProgress>(entity).copied().unwrap_or_default();
        let (energy, last_update) = world
            .get_component::<Energy>(entity)
            .map(|energy| (available_energy(energy, now, config).hundredths(), energy.last_update))
            .unwrap_or_default();

        Ok(PlayerView {
            x: position.x,
            y: position.y,
            vx: velocity.vx,
            vy: velocity.vy,
            energy,
            last_update,
            next_checkpoint: progress.next_checkpoint,
            finished: progress.is_finished(),
        })
    }
}

impl System for RaceSystem {
    fn id(&self) -> ModuleId {
        Self::ID
    }

    fn address(&self) -> Identity {
        self.address
    }
}

/// Entity and state of `race_id`, or `RaceNotFound`.
pub(crate) fn race_entry(world: &World, race_id: RaceId) -> Result<(Entity, &RaceState), GameError> {
    world
        .entity(&EntityKey::Race(race_id))
        .and_then(|entity| world.get_component::<RaceState>(entity).map(|race| (entity, race)))
        .ok_or(GameError::RaceNotFound(race_id))
}

fn track_exists(world: &World, track_id: TrackId) -> bool {
    world
        .entity(&EntityKey::Track(track_id))
        .is_some_and(|entity| world.has_component::<Track>(entity))
}

// src/systems/move_system.rs

use log::{debug, info};

use super::context::SystemContext;
use super::race_system::race_entry;
use crate::components::energy::Energy;
use crate::components::position::Position2D;
use crate::components::progress::PlayerProgress;
use crate::components::race::RaceStatus;
use crate::components::velocity::Velocity2D;
use crate::ecs::entity::EntityKey;
use crate::ecs::system::System;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::logic::rules::{available_energy, spend, validate_acceleration, PlayerStep, ProgressPolicy};
use crate::protocol::{Identity, ModuleId, RaceId};

/// Per-turn movement and the energy economy behind it.
#[derive(Debug, Clone, Copy)]
pub struct MoveSystem {
    address: Identity,
}

impl MoveSystem {
    pub const ID: ModuleId = ModuleId::from_static("race.systems.MoveSystem");

    pub fn new(address: Identity) -> Self {
        Self { address }
    }

    /// Accelerates `caller` by `(dvx, dvy)`, moves one step with the new
    /// velocity and pays the move cost. Progress along the track is then
    /// evaluated by `policy` in the same transaction.
    pub fn move_player(
        &self,
        ctx: &mut SystemContext<'_>,
        policy: &dyn ProgressPolicy,
        caller: Identity,
        race_id: RaceId,
        dvx: i32,
        dvy: i32,
    ) -> Result<(), GameError> {
        ctx.require_active(self)?;
        validate_acceleration(dvx, dvy)?;

        let (race_entity, race) = race_entry(ctx.world(), race_id)?;
        if race.status() != RaceStatus::Started {
            return Err(GameError::RaceNotStarted(race_id));
        }
        if !race.has_joined(caller) {
            return Err(GameError::PlayerNotJoined { race: race_id, player: caller });
        }
        let mut race = race.clone();

        let world = ctx.world();
        let entity = world
            .entity(&EntityKey::RacePlayer { race: race_id, player: caller })
            .ok_or(GameError::PlayerNotJoined { race: race_id, player: caller })?;
        let progress = world.get_component::<PlayerProgress>(entity).copied().unwrap_or_default();
        if progress.is_finished() {
            return Err(GameError::PlayerAlreadyFinished { race: race_id, player: caller });
        }
        let position = world.get_component::<Position2D>(entity).copied().unwrap_or_default();
        let velocity = world.get_component::<Velocity2D>(entity).copied().unwrap_or_default();
        let energy = world
            .get_component::<Energy>(entity)
            .copied()
            .unwrap_or(Energy::full(ctx.config().max_energy, ctx.now()));

        let available = available_energy(&energy, ctx.now(), ctx.config());
        let remaining = spend(available, ctx.config().move_cost())?;

        let velocity = velocity.accelerate(i64::from(dvx), i64::from(dvy));
        let next = position.step(velocity);
        let now = ctx.now();

        ctx.write(self, entity, velocity)?;
        ctx.write(self, entity, next)?;
        ctx.write(self, entity, Energy { value: remaining, last_update: now })?;
        ctx.emit(GameEvent::PlayerMoved { race_id, player: caller });
        debug!(
            "MoveSystem: {} in {} moved ({}, {}) -> ({}, {}), energy {} left",
            caller, race_id, position.x, position.y, next.x, next.y, remaining
        );

        let step = PlayerStep { player: caller, from: position, to: next, progress };
        let update = policy.evaluate(ctx.world(), &race, &step)?;
        if update.progress != progress {
            ctx.write(self, entity, update.progress)?;
        }
        for checkpoint in &update.crossed {
            debug!("MoveSystem: {} crossed checkpoint {} in {}", caller, checkpoint, race_id);
            ctx.emit(GameEvent::CheckpointCrossed { race_id, player: caller, checkpoint: *checkpoint });
        }
        if update.finished_rank.is_some() {
            let rank = race.record_finish(caller);
            ctx.emit(GameEvent::PlayerFinished { race_id, player: caller, rank });
            info!("MoveSystem: {} finished {} in position {}", caller, race_id, rank);
            if update.race_finished {
                race.advance(RaceStatus::Finished)?;
                ctx.emit(GameEvent::RaceFinished { race_id });
                info!("MoveSystem: {} finished", race_id);
            }
            ctx.write(self, race_entity, race)?;
        }
        Ok(())
    }
}

impl System for MoveSystem {
    fn id(&self) -> ModuleId {
        Self::ID
    }

    fn address(&self) -> Identity {
        self.address
    }
}

// src/systems/context.rs

use crate::clock::Timestamp;
use crate::components::game_state::GameCounters;
use crate::config::GameConfig;
use crate::ecs::component::Component;
use crate::ecs::entity::{Entity, EntityKey};
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::registry::{Authority, Role};

/// Everything a system may touch during one transaction.
///
/// Reads go straight to the world. Writes go through [`SystemContext::write`],
/// which checks that the writing system holds the game-logic role. Events are
/// only collected here; the caller publishes them once the transaction commits.
pub struct SystemContext<'a> {
    /// The live world. The caller holds a snapshot to restore on failure.
    world: &'a mut World,
    /// Roles and pause flags, read-only for the whole transaction.
    authority: &'a dyn Authority,
    config: &'a GameConfig,
    /// Clock reading taken once when the transaction began.
    now: Timestamp,
    /// Pending events, published only if the transaction commits.
    events: Vec<GameEvent>,
}

impl<'a> SystemContext<'a> {
    pub fn new(
        world: &'a mut World,
        authority: &'a dyn Authority,
        config: &'a GameConfig,
        now: Timestamp,
    ) -> Self {
        Self { world, authority, config, now, events: Vec::new() }
    }

    /// Read access. Writes go through [`SystemContext::write`].
    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn authority(&self) -> &dyn Authority {
        self.authority
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Fails with `Paused` if `system` is stopped. Must be the first check of
    /// every mutating entry point.
    pub fn require_active<S: System + ?Sized>(&self, system: &S) -> Result<(), GameError> {
        self.authority.require_not_paused(&system.id())
    }

    /// Allocating a handle is not gated: a handle without components is invisible.
    pub fn create_entity(&mut self) -> Entity {
        self.world.create_entity()
    }

    pub fn spawn_keyed(&mut self, key: EntityKey) -> Entity {
        self.world.spawn_keyed(key)
    }

    /// Stores `component` on `entity` on behalf of `system`.
    pub fn write<S, T>(&mut self, system: &S, entity: Entity, component: T) -> Result<Option<T>, GameError>
    where
        S: System + ?Sized,
        T: Component,
    {
        // Checked per write, so revoking the role stops a system mid-game.
        self.authority.require_role(Role::GameLogicContract, system.address())?;
        self.world.add_component(entity, component)
    }

    /// Runs `f` on the world-wide counters and stores the result.
    pub fn update_counters<S, R>(
        &mut self,
        system: &S,
        f: impl FnOnce(&mut GameCounters) -> R,
    ) -> Result<R, GameError>
    where
        S: System + ?Sized,
    {
        self.authority.require_role(Role::GameLogicContract, system.address())?;
        let entity = self.world.spawn_keyed(EntityKey::Singleton);
        // First use: counters start at zero.
        let mut counters = self.world.get_component::<GameCounters>(entity).cloned().unwrap_or_default();
        let result = f(&mut counters);
        self.write(system, entity, counters)?;
        Ok(result)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events collected so far, leaving the context empty.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

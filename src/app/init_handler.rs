// src/app/init_handler.rs
//! Bootstrap wiring: tables, registry entries and roles for a fresh game.

use log::debug;

use super::game_app::Modules;
use crate::components;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::protocol::Identity;
use crate::registry::{GameRegistry, Role};

/// Component tables get module addresses from 1, systems from here.
const FIRST_SYSTEM_SLOT: u64 = 0x100;

pub(crate) fn system_address(index: u64) -> Identity {
    Identity::module(FIRST_SYSTEM_SLOT + index)
}

/// A world with every component table the game uses.
pub(crate) fn initialize_world() -> World {
    let mut world = World::new();
    components::register_all(&mut world);
    world
}

/// Initializes `registry` for `admin` and wires in every table of `world`
/// and every system of `modules`. Returns the events this produced.
pub(crate) fn install(
    registry: &mut GameRegistry,
    world: &mut World,
    admin: Identity,
    modules: &Modules,
) -> Result<Vec<GameEvent>, GameError> {
    let mut events = vec![registry.initialize(admin)?];
    events.extend(registry.grant_role(admin, Role::Deployer, admin)?);
    events.extend(registry.grant_role(admin, Role::Pauser, admin)?);

    for (index, id) in world.component_ids().into_iter().enumerate() {
        let address = Identity::module(index as u64 + 1);
        debug!("init: component {} -> {}", id, address);
        events.push(registry.register_component(admin, id, address)?);
    }

    let systems: [&dyn System; 3] = [&modules.race, &modules.movement, &modules.track];
    for system in systems {
        debug!("init: system {} -> {}", system.id(), system.address());
        events.push(registry.register_system(admin, system.id(), system.address())?);
        events.extend(registry.grant_role(admin, Role::GameLogicContract, system.address())?);
    }
    Ok(events)
}

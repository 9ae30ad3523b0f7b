// src/registry/game_registry.rs

use std::collections::{BTreeSet, HashMap};

use log::{info, warn};

use super::roles::{Role, RoleTable};
use super::Authority;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::protocol::{Identity, ModuleId};

/// Binds logical module ids to addresses and owns roles and pause flags.
///
/// Every mutating method checks the caller's role before anything else and
/// returns the event it produced, so the caller decides when it becomes
/// visible. Admin calls are not subject to the pause flags.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    initialized: bool,
    roles: RoleTable,
    components: HashMap<ModuleId, Identity>,
    systems: HashMap<ModuleId, Identity>,
    paused: bool,
    paused_systems: BTreeSet<ModuleId>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    /// A registry with no roles granted. It starts paused.
    pub fn new() -> Self {
        Self {
            initialized: false,
            roles: RoleTable::default(),
            components: HashMap::new(),
            systems: HashMap::new(),
            paused: true,
            paused_systems: BTreeSet::new(),
        }
    }

    /// One-time setup: makes `admin` the first holder of the admin role.
    pub fn initialize(&mut self, admin: Identity) -> Result<GameEvent, GameError> {
        if self.initialized {
            warn!("GameRegistry: initialize called twice");
            return Err(GameError::AlreadyInitialized);
        }
        self.initialized = true;
        self.roles.grant(Role::DefaultAdmin, admin);
        info!("GameRegistry: initialized with admin {}", admin);
        Ok(GameEvent::RoleGranted { role: Role::DefaultAdmin, account: admin, sender: admin })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // --- Roles ---

    /// Granting a role the account already holds succeeds without an event.
    pub fn grant_role(
        &mut self,
        sender: Identity,
        role: Role,
        account: Identity,
    ) -> Result<Option<GameEvent>, GameError> {
        self.require_role(Role::DefaultAdmin, sender)?;
        if !self.roles.grant(role, account) {
            return Ok(None);
        }
        info!("GameRegistry: {} granted to {} by {}", role, account, sender);
        Ok(Some(GameEvent::RoleGranted { role, account, sender }))
    }

    /// Revoking a role the account does not hold succeeds without an event.
    pub fn revoke_role(
        &mut self,
        sender: Identity,
        role: Role,
        account: Identity,
    ) -> Result<Option<GameEvent>, GameError> {
        self.require_role(Role::DefaultAdmin, sender)?;
        if !self.roles.revoke(role, account) {
            return Ok(None);
        }
        info!("GameRegistry: {} revoked from {} by {}", role, account, sender);
        Ok(Some(GameEvent::RoleRevoked { role, account, sender }))
    }

    pub fn role_members(&self, role: Role) -> Vec<Identity> {
        self.roles.members(role)
    }

    // --- Pause ---

    pub fn set_paused(&mut self, sender: Identity, paused: bool) -> Result<Option<GameEvent>, GameError> {
        self.require_role(Role::Pauser, sender)?;
        if self.paused == paused {
            return Ok(None);
        }
        self.paused = paused;
        info!("GameRegistry: game {}", if paused { "paused" } else { "unpaused" });
        Ok(Some(GameEvent::PauseChanged { system: None, paused }))
    }

    pub fn set_system_paused(
        &mut self,
        sender: Identity,
        system: ModuleId,
        paused: bool,
    ) -> Result<Option<GameEvent>, GameError> {
        self.require_role(Role::Pauser, sender)?;
        let changed = if paused {
            self.paused_systems.insert(system.clone())
        } else {
            self.paused_systems.remove(&system)
        };
        if !changed {
            return Ok(None);
        }
        info!("GameRegistry: system {} {}", system, if paused { "paused" } else { "unpaused" });
        Ok(Some(GameEvent::PauseChanged { system: Some(system), paused }))
    }

    /// The global flag only. See [`Authority::is_system_paused`] for the
    /// effective state of one system.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // --- Module wiring ---

    /// Points `id` at `address`, replacing any previous binding.
    pub fn register_component(
        &mut self,
        sender: Identity,
        id: ModuleId,
        address: Identity,
    ) -> Result<GameEvent, GameError> {
        self.require_role(Role::Deployer, sender)?;
        if let Some(previous) = self.components.insert(id.clone(), address) {
            info!("GameRegistry: component {} rebound from {} to {}", id, previous, address);
        } else {
            info!("GameRegistry: component {} registered at {}", id, address);
        }
        Ok(GameEvent::ComponentRegistered { id, address })
    }

    /// Points `id` at `address`, replacing any previous binding.
    pub fn register_system(
        &mut self,
        sender: Identity,
        id: ModuleId,
        address: Identity,
    ) -> Result<GameEvent, GameError> {
        self.require_role(Role::Deployer, sender)?;
        if let Some(previous) = self.systems.insert(id.clone(), address) {
            info!("GameRegistry: system {} rebound from {} to {}", id, previous, address);
        } else {
            info!("GameRegistry: system {} registered at {}", id, address);
        }
        Ok(GameEvent::SystemRegistered { id, address })
    }

    pub fn get_component(&self, id: &ModuleId) -> Option<Identity> {
        self.components.get(id).copied()
    }

    pub fn get_system(&self, id: &ModuleId) -> Option<Identity> {
        self.systems.get(id).copied()
    }
}

impl Authority for GameRegistry {
    fn has_role(&self, role: Role, account: Identity) -> bool {
        self.roles.has(role, account)
    }

    fn is_system_paused(&self, system: &ModuleId) -> bool {
        self.paused || self.paused_systems.contains(system)
    }
}

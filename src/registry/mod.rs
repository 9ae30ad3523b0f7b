// src/registry/mod.rs
//! Module wiring, role-based access control and pause flags.
//!
//! Systems never see [`GameRegistry`] directly. They are handed an
//! [`Authority`], which is all they need to gate their own calls.

pub mod game_registry;
pub mod roles;

pub use game_registry::GameRegistry;
pub use roles::{Role, RoleTable};

use crate::error::GameError;
use crate::protocol::{Identity, ModuleId};

/// Read-only view of the access-control state.
pub trait Authority {
    fn has_role(&self, role: Role, account: Identity) -> bool;

    /// Whether `system` is stopped, either by the global flag or its own.
    fn is_system_paused(&self, system: &ModuleId) -> bool;

    fn require_role(&self, role: Role, account: Identity) -> Result<(), GameError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(GameError::MissingRole { role, account })
        }
    }

    fn require_not_paused(&self, system: &ModuleId) -> Result<(), GameError> {
        if self.is_system_paused(system) {
            Err(GameError::Paused)
        } else {
            Ok(())
        }
    }
}

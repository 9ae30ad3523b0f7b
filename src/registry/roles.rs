// src/registry/roles.rs

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::Identity;

/// Capabilities an identity can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes every role, itself included.
    #[serde(rename = "DEFAULT_ADMIN_ROLE")]
    DefaultAdmin,
    /// Registers components and systems.
    #[serde(rename = "DEPLOYER_ROLE")]
    Deployer,
    /// Creates tracks.
    #[serde(rename = "MANAGER_ROLE")]
    Manager,
    /// Flips the global and per-system pause flags.
    #[serde(rename = "PAUSER_ROLE")]
    Pauser,
    /// Held by system addresses; allows writing component tables.
    #[serde(rename = "GAME_LOGIC_CONTRACT_ROLE")]
    GameLogicContract,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::DefaultAdmin,
        Role::Deployer,
        Role::Manager,
        Role::Pauser,
        Role::GameLogicContract,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Deployer => "DEPLOYER_ROLE",
            Role::Manager => "MANAGER_ROLE",
            Role::Pauser => "PAUSER_ROLE",
            Role::GameLogicContract => "GAME_LOGIC_CONTRACT_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// role -> set of identities holding it.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    members: HashMap<Role, BTreeSet<Identity>>,
}

impl RoleTable {
    /// Returns `false` if `account` already held `role`.
    pub fn grant(&mut self, role: Role, account: Identity) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Returns `false` if `account` did not hold `role`.
    pub fn revoke(&mut self, role: Role, account: Identity) -> bool {
        self.members.get_mut(&role).is_some_and(|set| set.remove(&account))
    }

    pub fn has(&self, role: Role, account: Identity) -> bool {
        self.members.get(&role).is_some_and(|set| set.contains(&account))
    }

    /// Holders of `role`, in ascending identity order.
    pub fn members(&self, role: Role) -> Vec<Identity> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

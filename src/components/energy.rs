// src/components/energy.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::ecs::component::Component;
use crate::protocol::ModuleId;

/// Fixed-point energy in hundredths: 0 is empty, 10000 is 100.00%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyAmount(pub u32);

impl EnergyAmount {
    pub const ZERO: EnergyAmount = EnergyAmount(0);

    pub fn hundredths(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EnergyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Stored energy and the moment it was last written. What is actually
/// available also depends on how much time passed since then, see
/// `logic::rules::energy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Energy {
    pub value: EnergyAmount,
    pub last_update: Timestamp,
}

impl Energy {
    pub fn full(max: u32, now: Timestamp) -> Self {
        Self { value: EnergyAmount(max), last_update: now }
    }
}

impl Component for Energy {
    const ID: ModuleId = ModuleId::from_static("race.components.Energy");
}

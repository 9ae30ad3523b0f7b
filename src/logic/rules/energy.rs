// src/logic/rules/energy.rs
//! Linear energy regeneration, in fixed-point hundredths.

use crate::clock::Timestamp;
use crate::components::energy::{Energy, EnergyAmount};
use crate::config::GameConfig;
use crate::error::GameError;

/// Energy available at `now`: what was stored plus what regenerated since,
/// capped at the tank size. A clock that went backwards regenerates nothing.
pub fn available_energy(energy: &Energy, now: Timestamp, config: &GameConfig) -> EnergyAmount {
    let elapsed = now.saturating_sub(energy.last_update);
    let regenerated = u64::from(config.regen_per_second).saturating_mul(elapsed);
    let total = u64::from(energy.value.hundredths()).saturating_add(regenerated);
    // Fits in u32 after the cap.
    EnergyAmount(total.min(u64::from(config.max_energy)) as u32)
}

/// What is left after paying `cost` out of `available`.
pub fn spend(available: EnergyAmount, cost: u32) -> Result<EnergyAmount, GameError> {
    available
        .hundredths()
        .checked_sub(cost)
        .map(EnergyAmount)
        .ok_or(GameError::NotEnoughEnergy { available: available.hundredths(), required: cost })
}

// src/config/mod.rs
//! Tunable game rules and their defaults.

pub mod game;

pub use game::{FinishRule, GameConfig};

/// Full tank, in hundredths (100.00%).
pub const MAX_ENERGY: u32 = 100_00;
/// Regeneration per elapsed second, in hundredths. A full tank takes 5 s.
pub const REGEN_PER_SECOND: u32 = 20_00;
/// Cell every player starts on.
pub const START_CELL: (i64, i64) = (1, 1);
/// Upper bound on the number of slots a race may ask for.
pub const MAX_PLAYERS: u32 = 16;

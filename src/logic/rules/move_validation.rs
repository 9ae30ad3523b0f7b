// src/logic/rules/move_validation.rs
//! Acceleration limits for a single move.

use crate::error::GameError;

/// Each axis may change by at most one unit per move.
pub fn is_valid_acceleration(dv: i32) -> bool {
    (-1..=1).contains(&dv)
}

pub fn validate_acceleration(dvx: i32, dvy: i32) -> Result<(), GameError> {
    if is_valid_acceleration(dvx) && is_valid_acceleration(dvy) {
        Ok(())
    } else {
        Err(GameError::InvalidMove { dvx, dvy })
    }
}

// src/config/game.rs

use serde::{Deserialize, Serialize};

use super::{MAX_ENERGY, MAX_PLAYERS, REGEN_PER_SECOND, START_CELL};
use crate::error::GameError;

/// When a race as a whole counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishRule {
    /// Race is FINISHED once every joined player crossed the last checkpoint.
    #[default]
    AllPlayers,
    /// Race is FINISHED as soon as somebody crossed the last checkpoint.
    FirstPlayer,
}

/// Rules of the energy economy and race setup.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tank size, in hundredths.
    pub max_energy: u32,
    /// Energy one move consumes. `None` means a full tank.
    pub move_cost: Option<u32>,
    /// Linear regeneration per elapsed second, in hundredths.
    pub regen_per_second: u32,
    pub start_cell: (i64, i64),
    pub finish_rule: FinishRule,
    pub max_players: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_energy: MAX_ENERGY,
            move_cost: None,
            regen_per_second: REGEN_PER_SECOND,
            start_cell: START_CELL,
            finish_rule: FinishRule::default(),
            max_players: MAX_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn move_cost(&self) -> u32 {
        self.move_cost.unwrap_or(self.max_energy)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_energy == 0 {
            return Err(GameError::Config("max_energy must be positive".into()));
        }
        if self.move_cost() > self.max_energy {
            return Err(GameError::Config(format!(
                "move_cost {} exceeds max_energy {}",
                self.move_cost(),
                self.max_energy
            )));
        }
        if self.max_players == 0 {
            return Err(GameError::Config("max_players must be positive".into()));
        }
        Ok(())
    }
}

// src/logic/rules/mod.rs
//! Game rules: what a move may do and what it costs.

pub mod energy;
pub mod move_validation;
pub mod progress;


pub use energy::{available_energy, spend};
pub use move_validation::validate_acceleration;
pub use progress::{CheckpointProgress, PlayerStep, ProgressPolicy, ProgressUpdate};

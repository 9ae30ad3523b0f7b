// src/logic/mod.rs
//! Pure game logic. Nothing in here writes to the world.

pub mod geometry;
pub mod rules;

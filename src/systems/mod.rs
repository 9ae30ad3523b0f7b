// src/systems/mod.rs
//! Behaviour modules. Each system is a small struct carrying its address,
//! and every entry point takes a [`SystemContext`] for the transaction it
//! runs in.

pub mod context;
pub mod move_system;
pub mod race_system;
pub mod track_system;

pub use context::SystemContext;
pub use move_system::MoveSystem;
pub use race_system::RaceSystem;
pub use track_system::TrackSystem;

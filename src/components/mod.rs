// src/components/mod.rs
//! Plain data attached to entities. One file per component type.

pub mod checkpoint;
pub mod energy;
pub mod game_state;
pub mod line_segment;
pub mod position;
pub mod progress;
pub mod race;
pub mod track;
pub mod velocity;

pub use checkpoint::Checkpoint;
pub use energy::{Energy, EnergyAmount};
pub use game_state::GameCounters;
pub use line_segment::LineSegment;
pub use position::Position2D;
pub use progress::PlayerProgress;
pub use race::{RaceState, RaceStatus};
pub use track::Track;
pub use velocity::Velocity2D;

use crate::ecs::World;

/// Creates every table the game writes to. Safe to call more than once.
pub fn register_all(world: &mut World) {
    world.register_component::<GameCounters>();
    world.register_component::<RaceState>();
    world.register_component::<Position2D>();
    world.register_component::<Velocity2D>();
    world.register_component::<Energy>();
    world.register_component::<PlayerProgress>();
    world.register_component::<LineSegment>();
    world.register_component::<Checkpoint>();
    world.register_component::<Track>();
}

// src/lib.rs
//! Authoritative simulation core of a turn-based grid racing game.
//!
//! State lives in a small hand-rolled ECS ([`ecs::World`]). Behaviour lives in
//! systems that are wired together and access-controlled through a
//! [`registry::GameRegistry`]. [`app::GameApp`] ties everything together and
//! runs every call as an all-or-nothing transaction.

pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod events;
pub mod logic;
pub mod protocol;
pub mod registry;
pub mod systems;

pub use app::GameApp;
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{FinishRule, GameConfig};
pub use error::{ErrorKind, GameError};
pub use events::{EventLog, GameEvent};
pub use protocol::{
    CheckpointSpec, Command, Identity, ModuleId, Outcome, PlayerView, RaceId, RaceSnapshot,
    RaceView, TrackId, TrackSpec, TrackView,
};
pub use registry::Role;

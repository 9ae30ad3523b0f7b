// src/error.rs

//! Error types returned by every entry point.

use thiserror::Error;

use crate::components::race::RaceStatus;
use crate::ecs::entity::Entity;
use crate::protocol::{Identity, RaceId, TrackId};
use crate::registry::Role;

/// Broad family a [`GameError`] belongs to, so callers can branch without
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StateConflict,
    Validation,
    ResourceExhaustion,
    Authorization,
    Reinitialization,
    Internal,
}

/// A rejected call. A call that returns one of these has changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("race {0} not found")]
    RaceNotFound(RaceId),

    #[error("track {0} not found")]
    TrackNotFound(TrackId),

    #[error("player {player} already joined {race}")]
    PlayerAlreadyJoined { race: RaceId, player: Identity },

    #[error("race {0} already started")]
    RaceAlreadyStarted(RaceId),

    #[error("race {0} is not started")]
    RaceNotStarted(RaceId),

    #[error("player {player} has not joined {race}")]
    PlayerNotJoined { race: RaceId, player: Identity },

    #[error("player {player} already finished {race}")]
    PlayerAlreadyFinished { race: RaceId, player: Identity },

    #[error("race status cannot go from {from:?} to {to:?}")]
    InvalidStatusTransition { from: RaceStatus, to: RaceStatus },

    #[error("invalid move ({dvx}, {dvy}): each axis must be -1, 0 or 1")]
    InvalidMove { dvx: i32, dvy: i32 },

    #[error("invalid player count {requested} (allowed 1..={max})")]
    InvalidPlayerCount { requested: u32, max: u32 },

    #[error("invalid track: {0}")]
    InvalidTrack(String),

    #[error("not enough energy: {available} available, {required} required")]
    NotEnoughEnergy { available: u32, required: u32 },

    #[error("{account} is missing role {role:?}")]
    MissingRole { role: Role, account: Identity },

    #[error("game is paused")]
    Paused,

    #[error("already initialized")]
    AlreadyInitialized,

    #[error("component {0} is not registered in the world")]
    ComponentNotRegistered(&'static str),

    #[error("entity {0:?} was never allocated")]
    UnknownEntity(Entity),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::RaceNotFound(_) | GameError::TrackNotFound(_) => ErrorKind::NotFound,
            GameError::PlayerAlreadyJoined { .. }
            | GameError::RaceAlreadyStarted(_)
            | GameError::RaceNotStarted(_)
            | GameError::PlayerNotJoined { .. }
            | GameError::PlayerAlreadyFinished { .. }
            | GameError::InvalidStatusTransition { .. } => ErrorKind::StateConflict,
            GameError::InvalidMove { .. }
            | GameError::InvalidPlayerCount { .. }
            | GameError::InvalidTrack(_)
            | GameError::InvalidCommand(_) => ErrorKind::Validation,
            GameError::NotEnoughEnergy { .. } => ErrorKind::ResourceExhaustion,
            GameError::MissingRole { .. } | GameError::Paused => ErrorKind::Authorization,
            GameError::AlreadyInitialized => ErrorKind::Reinitialization,
            GameError::ComponentNotRegistered(_)
            | GameError::UnknownEntity(_)
            | GameError::Config(_)
            | GameError::Serialization(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(GameError::RaceNotFound(RaceId(9)).kind(), ErrorKind::NotFound);
        assert_eq!(GameError::RaceNotStarted(RaceId(1)).kind(), ErrorKind::StateConflict);
        assert_eq!(GameError::InvalidMove { dvx: 2, dvy: 0 }.kind(), ErrorKind::Validation);
        assert_eq!(
            GameError::NotEnoughEnergy { available: 10, required: 10_000 }.kind(),
            ErrorKind::ResourceExhaustion
        );
        assert_eq!(GameError::Paused.kind(), ErrorKind::Authorization);
        assert_eq!(GameError::AlreadyInitialized.kind(), ErrorKind::Reinitialization);
    }

    #[test]
    fn messages_name_the_problem() {
        let err = GameError::NotEnoughEnergy { available: 4_000, required: 10_000 };
        assert_eq!(err.to_string(), "not enough energy: 4000 available, 10000 required");
    }
}

// src/protocol.rs

//! Identifiers, commands and read views exchanged with callers.
//!
//! Everything here is plain data with serde derives, so a front end can
//! drive the engine with JSON.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::line_segment::LineSegment;
use crate::components::race::RaceStatus;
use crate::error::GameError;
use crate::registry::Role;

// --- Identifiers ---

/// An account or module address. Players, administrators and installed
/// systems are all identified the same way.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Identity(pub u64);

impl Identity {
    /// Address handed to the n-th module installed by the bootstrap.
    pub const fn module(index: u64) -> Self {
        Identity(0x5157_0000_0000_0000 | index)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl FromStr for Identity {
    type Err = GameError;

    /// Accepts `0x`-prefixed hex or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(Identity)
            .map_err(|e| GameError::InvalidCommand(format!("bad identity {s:?}: {e}")))
    }
}

/// Race identifier. Allocated from 1 upwards.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(pub u64);

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "race#{}", self.0)
    }
}

/// Track identifier. Allocated from 1 upwards.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// Logical name of a component table or a system, as stored in the registry.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(Cow<'static, str>);

impl ModuleId {
    pub const fn from_static(name: &'static str) -> Self {
        ModuleId(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        ModuleId(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Commands (caller -> engine) ---

/// Geometry of a checkpoint as submitted by a track manager.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSpec {
    pub lines: Vec<LineSegment>,
}

/// Geometry of a whole course as submitted by a track manager.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackSpec {
    pub lines: Vec<LineSegment>,
    pub checkpoints: Vec<CheckpointSpec>,
}

/// Every state-changing entry point, in message form.
/// Each command runs as one all-or-nothing transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CreateRace {
        nb_players: u32,
        #[serde(default)]
        track: Option<TrackId>,
    },
    JoinRace {
        race_id: RaceId,
    },
    Move {
        race_id: RaceId,
        vx: i32,
        vy: i32,
    },
    CreateTrack(TrackSpec),
    GrantRole {
        role: Role,
        account: Identity,
    },
    RevokeRole {
        role: Role,
        account: Identity,
    },
    SetPaused {
        paused: bool,
    },
    SetSystemPaused {
        system: ModuleId,
        paused: bool,
    },
    RegisterComponent {
        id: ModuleId,
        address: Identity,
    },
    RegisterSystem {
        id: ModuleId,
        address: Identity,
    },
}

/// What a successful command produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    RaceCreated { race_id: RaceId },
    Joined { race_id: RaceId, started: bool },
    Moved { race_id: RaceId },
    TrackCreated { track_id: TrackId },
    Done,
}

// --- Read views (engine -> caller) ---

/// Public state of a race.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RaceView {
    pub id: RaceId,
    pub creator: Identity,
    pub status: RaceStatus,
    pub nb_players: u32,
    pub nb_players_joined: u32,
    /// Fixed-length slot array; `None` is an empty slot.
    pub players: Vec<Option<Identity>>,
    pub track: Option<TrackId>,
    /// Players that reached the final checkpoint, in finishing order.
    pub finish_order: Vec<Identity>,
}

/// Public state of one player inside one race.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub x: i64,
    pub y: i64,
    pub vx: i64,
    pub vy: i64,
    /// Energy available right now (regeneration included), in hundredths.
    pub energy: u32,
    pub last_update: u64,
    /// Index of the next checkpoint to cross.
    pub next_checkpoint: u32,
    pub finished: bool,
}

/// One player of a [`RaceSnapshot`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub player: Identity,
    #[serde(flatten)]
    pub view: PlayerView,
}

/// A race and all of its placed players, for rendering in one go.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RaceSnapshot {
    pub race: RaceView,
    pub players: Vec<PlayerEntry>,
}

/// Public geometry of a course.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackView {
    pub id: TrackId,
    pub lines: Vec<LineSegment>,
    pub checkpoints: Vec<CheckpointSpec>,
}

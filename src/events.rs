// src/events.rs

//! Append-only log of everything that happened.

use serde::{Deserialize, Serialize};

use crate::protocol::{Identity, ModuleId, RaceId, TrackId};
use crate::registry::Role;

/// One observable fact. Emitted exactly once per successful state change,
/// in the same transaction as the change itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum GameEvent {
    RaceCreated { race_id: RaceId, creator: Identity },
    PlayerJoined { race_id: RaceId, player: Identity },
    RaceStarted { race_id: RaceId },
    PlayerMoved { race_id: RaceId, player: Identity },
    CheckpointCrossed { race_id: RaceId, player: Identity, checkpoint: u32 },
    PlayerFinished { race_id: RaceId, player: Identity, rank: u32 },
    RaceFinished { race_id: RaceId },
    TrackCreated { track_id: TrackId },
    RoleGranted { role: Role, account: Identity, sender: Identity },
    RoleRevoked { role: Role, account: Identity, sender: Identity },
    PauseChanged { system: Option<ModuleId>, paused: bool },
    ComponentRegistered { id: ModuleId, address: Identity },
    SystemRegistered { id: ModuleId, address: Identity },
}

/// The event history. Entries are never removed or rewritten.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    entries: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: GameEvent) {
        self.entries.push(event);
    }

    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.entries.extend(events);
    }

    pub fn all(&self) -> &[GameEvent] {
        &self.entries
    }

    /// Events recorded after `cursor`, where a cursor is a previous [`EventLog::len`].
    pub fn since(&self, cursor: usize) -> &[GameEvent] {
        self.entries.get(cursor..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

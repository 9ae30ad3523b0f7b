// src/components/race.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::error::GameError;
use crate::protocol::{Identity, ModuleId, RaceId, RaceView, TrackId};

/// Lifecycle of a race. Only ever moves forward, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaceStatus {
    #[default]
    Undefined,
    WaitingForPlayers,
    Started,
    Finished,
}

/// Everything known about one race: who made it, who is in which slot, and
/// how far along the lifecycle it is.
///
/// The slot array is sized once at creation and never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceState {
    pub id: RaceId,
    pub creator: Identity,
    status: RaceStatus,
    players: Box<[Option<Identity>]>,
    nb_players_joined: u32,
    pub track: Option<TrackId>,
    finish_order: Vec<Identity>,
}

impl RaceState {
    /// A race waiting for `nb_players` players, every slot empty.
    pub fn new(id: RaceId, creator: Identity, nb_players: u32, track: Option<TrackId>) -> Self {
        Self {
            id,
            creator,
            status: RaceStatus::WaitingForPlayers,
            players: vec![None; nb_players as usize].into_boxed_slice(),
            nb_players_joined: 0,
            track,
            finish_order: Vec::new(),
        }
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn nb_players(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn nb_players_joined(&self) -> u32 {
        self.nb_players_joined
    }

    pub fn players(&self) -> &[Option<Identity>] {
        &self.players
    }

    pub fn joined_players(&self) -> impl Iterator<Item = Identity> + '_ {
        self.players.iter().flatten().copied()
    }

    pub fn slot_of(&self, player: Identity) -> Option<usize> {
        self.players.iter().position(|slot| *slot == Some(player))
    }

    pub fn has_joined(&self, player: Identity) -> bool {
        self.slot_of(player).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.nb_players_joined == self.nb_players()
    }

    pub fn finish_order(&self) -> &[Identity] {
        &self.finish_order
    }

    pub fn has_finished(&self, player: Identity) -> bool {
        self.finish_order.contains(&player)
    }

    /// Puts `player` into the first empty slot and returns its index.
    /// Slots only change while the race is waiting for players.
    pub(crate) fn take_slot(&mut self, player: Identity) -> Result<usize, GameError> {
        if self.status != RaceStatus::WaitingForPlayers {
            return Err(GameError::RaceAlreadyStarted(self.id));
        }
        if self.has_joined(player) {
            return Err(GameError::PlayerAlreadyJoined { race: self.id, player });
        }
        let slot = self
            .players
            .iter()
            .position(Option::is_none)
            .ok_or(GameError::RaceAlreadyStarted(self.id))?;
        self.players[slot] = Some(player);
        self.nb_players_joined += 1;
        Ok(slot)
    }

    /// Appends `player` to the finishing order and returns its 1-based rank.
    pub(crate) fn record_finish(&mut self, player: Identity) -> u32 {
        if !self.has_finished(player) {
            self.finish_order.push(player);
        }
        self.finish_order.len() as u32
    }

    /// Moves the lifecycle forward to `to`. Staying put or going back is refused.
    pub(crate) fn advance(&mut self, to: RaceStatus) -> Result<(), GameError> {
        if to <= self.status {
            return Err(GameError::InvalidStatusTransition { from: self.status, to });
        }
        self.status = to;
        Ok(())
    }

    pub fn view(&self) -> RaceView {
        RaceView {
            id: self.id,
            creator: self.creator,
            status: self.status,
            nb_players: self.nb_players(),
            nb_players_joined: self.nb_players_joined,
            players: self.players.to_vec(),
            track: self.track,
            finish_order: self.finish_order.clone(),
        }
    }
}

impl Component for RaceState {
    const ID: ModuleId = ModuleId::from_static("race.components.Race");
}

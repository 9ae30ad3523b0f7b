// src/ecs/entity.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::protocol::{Identity, RaceId, TrackId};

/// A game object handle. Just an index into the component tables; what the
/// object *is* comes from the components attached to it.
///
/// Handles are allocated densely from 0 and never reused, since race history
/// is append-only.
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
pub struct Entity(pub usize);

impl Entity {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Logical name of an entity. Lets systems find "player P in race R" without
/// storing handles in each other's components.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum EntityKey {
    /// Holder of world-wide bookkeeping such as id counters.
    Singleton,
    Race(RaceId),
    RacePlayer { race: RaceId, player: Identity },
    Track(TrackId),
    TrackLine { track: TrackId, index: u32 },
    Checkpoint { track: TrackId, index: u32 },
    CheckpointLine { track: TrackId, checkpoint: u32, index: u32 },
}

/// Allocates entity handles and remembers which key each one was created for.
#[derive(Debug, Default, Clone)]
pub struct EntityManager {
    /// `keys[i]` is the key of `Entity(i)`, if it has one.
    keys: Vec<Option<EntityKey>>,
    by_key: HashMap<EntityKey, Entity>,
}

impl EntityManager {
    /// Allocates an anonymous entity.
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.keys.len());
        self.keys.push(None);
        entity
    }

    /// Returns the entity registered under `key`, allocating it on first use.
    pub fn create_keyed(&mut self, key: EntityKey) -> Entity {
        if let Some(&existing) = self.by_key.get(&key) {
            return existing;
        }
        let entity = Entity(self.keys.len());
        self.keys.push(Some(key));
        self.by_key.insert(key, entity);
        entity
    }

    pub fn lookup(&self, key: &EntityKey) -> Option<Entity> {
        self.by_key.get(key).copied()
    }

    pub fn key_of(&self, entity: Entity) -> Option<EntityKey> {
        self.keys.get(entity.0).copied().flatten()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.0 < self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

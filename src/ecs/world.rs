// src/ecs/world.rs

// TypeId keys one table per component type; Any lets the tables share a map.
use std::any::{Any, TypeId};
use std::collections::HashMap;

use log::{debug, warn};

use crate::ecs::component::{Component, ComponentStorage};
use crate::ecs::entity::{Entity, EntityKey, EntityManager};
use crate::error::GameError;
use crate::protocol::ModuleId;

/// What the world needs from a component table without knowing its type.
///
/// Implemented once, for every `ComponentStorage<T>`, so a boxed table can
/// always clone itself and be downcast back to the concrete storage.
trait ErasedStorage: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn ErasedStorage>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Number of entities that have this component.
    fn len(&self) -> usize;
}

impl<T: Component> ErasedStorage for ComponentStorage<T> {
    fn clone_box(&self) -> Box<dyn ErasedStorage> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }
}

/// One component table plus the names it is known by.
struct ComponentStoreEntry {
    /// Logical id the registry binds to an address.
    id: ModuleId,
    /// Rust type name, for logs and `Debug`.
    type_name: &'static str,
    storage: Box<dyn ErasedStorage>,
}

impl Clone for ComponentStoreEntry {
    fn clone(&self) -> Self {
        Self { id: self.id.clone(), type_name: self.type_name, storage: self.storage.clone_box() }
    }
}

/// The component store: entity handles plus one dense table per component type.
///
/// Cloning a world deep-copies every table. The game uses that as the
/// rollback snapshot of a transaction.
#[derive(Clone, Default)]
pub struct World {
    /// Handle allocator plus the logical key of each handle.
    entities: EntityManager,
    /// One table per registered component type, keyed by its `TypeId`.
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Entities ---

    /// Allocates a handle with no logical key. Handles are never reused.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create_entity()
    }

    /// Entity registered under `key`, allocated on first use.
    pub fn spawn_keyed(&mut self, key: EntityKey) -> Entity {
        self.entities.create_keyed(key)
    }

    /// Handle of `key`, without allocating.
    pub fn entity(&self, key: &EntityKey) -> Option<Entity> {
        self.entities.lookup(key)
    }

    pub fn key_of(&self, entity: Entity) -> Option<EntityKey> {
        self.entities.key_of(entity)
    }

    /// Whether `entity` was handed out by this world.
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // --- Component tables ---

    /// Creates the table for `T`. Registering a type twice keeps the existing
    /// table and its data. Returns whether a new table was created.
    pub fn register_component<T: Component>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        // Keep the existing rows.
        if self.component_stores.contains_key(&type_id) {
            debug!("World: component {} already registered", T::ID);
            return false;
        }
        debug!("World: registering component {} ({})", T::ID, std::any::type_name::<T>());
        self.component_stores.insert(
            type_id,
            ComponentStoreEntry {
                id: T::ID,
                type_name: std::any::type_name::<T>(),
                storage: Box::new(ComponentStorage::<T>::new()),
            },
        );
        true
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.component_stores.contains_key(&TypeId::of::<T>())
    }

    /// Logical ids of every registered table, sorted.
    pub fn component_ids(&self) -> Vec<ModuleId> {
        let mut ids: Vec<ModuleId> =
            self.component_stores.values().map(|entry| entry.id.clone()).collect();
        ids.sort();
        ids
    }

    /// Typed view of `T`'s table. `None` if `T` was never registered.
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    // The downcast cannot fail for a registered `T`: the entry under
    // `TypeId::of::<T>()` always holds a `ComponentStorage<T>`.
    fn storage_mut<T: Component>(&mut self) -> Result<&mut ComponentStorage<T>, GameError> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.as_any_mut().downcast_mut::<ComponentStorage<T>>())
            .ok_or(GameError::ComponentNotRegistered(std::any::type_name::<T>()))
    }

    /// Sets `entity`'s `T`, overwriting any previous value, which is returned.
    ///
    /// Fails if `T` was never registered or `entity` was never allocated.
    /// Nothing is written in either case.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, GameError> {
        if !self.is_entity_alive(entity) {
            warn!("World: refusing {} for unallocated entity {:?}", T::ID, entity);
            return Err(GameError::UnknownEntity(entity));
        }
        Ok(self.storage_mut::<T>()?.insert(entity, component))
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(entity))
    }

    /// Bypasses the write gate of `SystemContext`.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>().ok().and_then(|storage| storage.get_mut(entity))
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Every entity that currently has a `T`, in handle order.
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        self.storage::<T>()
            .map(|storage| storage.iter().map(|(entity, _)| entity).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // (type, rows) per table, sorted so the output is stable.
        let mut tables: Vec<(&str, usize)> = self
            .component_stores
            .values()
            .map(|entry| (entry.type_name, entry.storage.len()))
            .collect();
        tables.sort_unstable();
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("tables", &tables)
            .finish()
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;

// src/ecs/component.rs

use crate::ecs::entity::Entity;
use crate::protocol::ModuleId;

/// Marker for data that can live in a component table.
///
/// `ID` is the logical name the table is registered under in the game
/// registry. `Clone` is required so the world can be snapshotted for
/// all-or-nothing transactions.
pub trait Component: std::fmt::Debug + Clone + Send + Sync + 'static {
    const ID: ModuleId;
}

/// Dense table of one component type, indexed by entity handle.
#[derive(Debug, Clone)]
pub struct ComponentStorage<T: Component> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T: Component> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), len: 0 }
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        let index = entity.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        let previous = self.slots[index].replace(component);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(entity.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots.get_mut(entity.index()).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let removed = self.slots.get_mut(entity.index()).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// `(entity, component)` pairs in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|c| (Entity(index), c)))
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Sprite entities and the arena that owns them
//!
//! Slots are reused, so handles carry a generation. A handle whose generation
//! no longer matches its slot is stale and resolves to nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityKind {
    /// Sliceable fruit, awards score and coins
    #[default]
    Normal,
    /// Bomb, costs a life when sliced
    Hazard,
}

/// Stable handle into the [`EntityStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

/// A falling/arcing sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Position, y measured upward from the baseline
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Edge length of the square sprite
    pub size: f32,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            kind,
            pos,
            vel,
            rotation: 0.0,
            size,
        }
    }

    /// Bounding box in screen space for a play area of the given height
    pub fn screen_bounds(&self, area_height: f32) -> Rect {
        let bottom = area_height - self.pos.y;
        Rect::new(self.pos.x, bottom - self.size, self.pos.x + self.size, bottom)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Arena of live entities with staged removal
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    staged: Vec<EntityId>,
    live: usize,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, reusing a free slot when one exists
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityId {
            index,
            generation: 0,
        }
    }

    fn slot(&self, id: EntityId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slot(id).and_then(|s| s.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an entity. Returns it the first time, `None` afterwards.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)?;
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(entity)
    }

    /// Mark an entity for removal at the next flush
    pub fn stage_removal(&mut self, id: EntityId) {
        self.staged.push(id);
    }

    /// Apply staged removals; returns how many entities actually left the store
    pub fn flush_removals(&mut self) -> usize {
        let staged = std::mem::take(&mut self.staged);
        staged
            .into_iter()
            .filter(|&id| self.remove(id).is_some())
            .count()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.entity.as_ref().map(|e| {
                (
                    EntityId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    e,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.entity.as_mut().map(|e| {
                (
                    EntityId {
                        index: i as u32,
                        generation,
                    },
                    e,
                )
            })
        })
    }

    /// Handles of all live entities, for passes that mutate the store
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Drop every entity and invalidate all outstanding handles
    pub fn clear(&mut self) {
        self.free.clear();
        self.staged.clear();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(i as u32);
        }
        self.live = 0;
    }
}

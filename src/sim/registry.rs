//! Entity registry
//!
//! Sole owner and liveness authority for all simulated entities. Entities
//! are kept sorted by id so iteration order is stable and reproducible.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::{Asteroid, Entity, EntityClass, EntityId, EntityKind, Ship, Shot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Live entities, ascending by id
    entities: Vec<Entity>,
    /// Next entity ID
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a new entity and return its handle
    pub fn spawn(&mut self, body: Body, kind: EntityKind) -> EntityId {
        debug_assert!(body.radius > 0.0, "spawned entity must have positive radius");
        let id = self.next_entity_id();
        // Fresh ids are always the largest, so pushing keeps the order
        self.entities.push(Entity { id, body, kind });
        id
    }

    pub fn spawn_ship(&mut self, body: Body) -> EntityId {
        self.spawn(body, EntityKind::Ship(Ship::default()))
    }

    pub fn spawn_asteroid(&mut self, body: Body, generation: u32) -> EntityId {
        self.spawn(body, EntityKind::Asteroid(Asteroid { generation }))
    }

    pub fn spawn_shot(&mut self, body: Body, ttl: f32) -> EntityId {
        self.spawn(body, EntityKind::Shot(Shot { ttl }))
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    /// Remove an entity. Returns it if it was live.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.index_of(id).map(|idx| self.entities.remove(idx))
    }

    /// Remove every entity in `ids` in one pass
    pub fn despawn_all(&mut self, ids: &[EntityId]) {
        if ids.is_empty() {
            return;
        }
        self.entities.retain(|e| !ids.contains(&e.id));
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = self.index_of(id)?;
        Some(&mut self.entities[idx])
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// All live entities in id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Live entities of one variant, in id order
    pub fn of_class(&self, class: EntityClass) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.class() == class)
    }

    pub fn asteroids(&self) -> impl Iterator<Item = &Entity> {
        self.of_class(EntityClass::Asteroid)
    }

    pub fn shots(&self) -> impl Iterator<Item = &Entity> {
        self.of_class(EntityClass::Shot)
    }

    pub fn count(&self, class: EntityClass) -> usize {
        self.of_class(class).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity. Ids keep counting up so old handles stay dead.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn rock(x: f32) -> Body {
        Body::at_rest(Vec2::new(x, 0.0), 20.0)
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn_asteroid(rock(0.0), 0);
        let b = reg.spawn_shot(Body::at_rest(Vec2::ZERO, 5.0), 1.0);
        assert!(a < b);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.count(EntityClass::Asteroid), 1);
        assert_eq!(reg.count(EntityClass::Shot), 1);
    }

    #[test]
    fn test_despawn_and_lookup() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn_asteroid(rock(1.0), 0);
        let b = reg.spawn_asteroid(rock(2.0), 0);
        let c = reg.spawn_asteroid(rock(3.0), 0);

        let removed = reg.despawn(b).unwrap();
        assert_eq!(removed.body.pos.x, 2.0);
        assert!(reg.despawn(b).is_none());
        assert!(reg.get(b).is_none());
        assert_eq!(reg.get(a).unwrap().body.pos.x, 1.0);
        assert_eq!(reg.get(c).unwrap().body.pos.x, 3.0);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn_asteroid(rock(0.0), 0);
        reg.clear();
        assert!(reg.is_empty());
        let b = reg.spawn_asteroid(rock(0.0), 0);
        assert_ne!(a, b);
        assert!(!reg.contains(a));
    }

    #[test]
    fn test_iteration_is_id_ordered() {
        let mut reg = EntityRegistry::new();
        let ids: Vec<_> = (0..5).map(|i| reg.spawn_asteroid(rock(i as f32), 0)).collect();
        reg.despawn(ids[2]);
        reg.spawn_asteroid(rock(9.0), 1);
        let seen: Vec<_> = reg.iter().map(|e| e.id).collect();
        let mut sorted = seen.clone();
        sorted.sort();
        assert_eq!(seen, sorted);
    }

    #[test]
    fn test_despawn_all() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn_asteroid(rock(0.0), 0);
        let b = reg.spawn_asteroid(rock(1.0), 0);
        let c = reg.spawn_asteroid(rock(2.0), 0);
        reg.despawn_all(&[a, c]);
        assert_eq!(reg.iter().map(|e| e.id).collect::<Vec<_>>(), vec![b]);
    }
}

use std::collections::HashMap;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity table: a flat Vec for iteration plus an id → slot index for lookup.
/// Designed for small-to-medium entity counts (thousands, not millions).
///
/// A lookup for an id that was never spawned (or was despawned) returns
/// `None`, so per-frame updates against unregistered handles are no-ops.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene. Spawning an id that is already present
    /// replaces the previous entity in place.
    pub fn spawn(&mut self, entity: Entity) {
        if let Some(&slot) = self.index.get(&entity.id) {
            self.entities[slot] = entity;
            return;
        }
        self.index.insert(entity.id, self.entities.len());
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.index.remove(&id)?;
        let removed = self.entities.swap_remove(slot);
        if let Some(moved) = self.entities.get(slot) {
            self.index.insert(moved.id, slot);
        }
        Some(removed)
    }

    /// Whether an entity with this id is registered.
    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.index.get(&id) {
            Some(&slot) => Some(&mut self.entities[slot]),
            None => None,
        }
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.tag == tag).collect()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        assert_eq!(scene.len(), 1);
        assert!(scene.despawn(id).is_some());
        assert_eq!(scene.len(), 0);
        assert!(!scene.contains(id));
        assert!(scene.despawn(id).is_none());
    }

    #[test]
    fn index_survives_swap_remove() {
        let mut scene = Scene::new();
        for i in 1..=4 {
            scene.spawn(Entity::new(EntityId(i)).with_tag(format!("e{i}")));
        }
        scene.despawn(EntityId(1));
        // The last entity was swapped into slot 0; its lookup must still resolve.
        assert_eq!(scene.get(EntityId(4)).unwrap().tag, "e4");
        assert_eq!(scene.get(EntityId(2)).unwrap().tag, "e2");
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn unregistered_handle_is_noop() {
        let mut scene = Scene::new();
        assert!(scene.get_mut(EntityId(42)).is_none());
        if let Some(e) = scene.get_mut(EntityId(42)) {
            e.pos = Vec3::ONE;
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn respawn_replaces_in_place() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("old"));
        scene.spawn(Entity::new(EntityId(1)).with_tag("new"));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().tag, "new");
    }

    #[test]
    fn find_by_tag_and_clear() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("sun"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("asteroid"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("asteroid"));
        assert_eq!(scene.find_by_tag("sun").unwrap().id, EntityId(1));
        assert_eq!(scene.find_all_by_tag("asteroid").len(), 2);
        scene.clear();
        assert!(scene.get(EntityId(1)).is_none());
    }
}

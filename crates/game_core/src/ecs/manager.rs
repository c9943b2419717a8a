//! Entity manager
//!
//! Owns every entity, drives the per-tick `update` and `draw` sweeps in
//! creation order and reclaims destroyed entities during an explicit
//! [`Manager::refresh`] pass. Destroying an entity never removes it on the
//! spot, so a sweep always sees a stable population.

use slotmap::SlotMap;

use super::{Entity, EntityId};

/// Owning registry of all entities
#[derive(Debug, Default)]
pub struct Manager {
    entities: SlotMap<EntityId, Entity>,
    order: Vec<EntityId>,
}

impl Manager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Create a new active entity at the end of the sweep order
    pub fn add_entity(&mut self) -> &mut Entity {
        let id = self.entities.insert_with_key(Entity::new);
        self.order.push(id);
        log::debug!("Created entity {:?} ({} total)", id, self.order.len());
        &mut self.entities[id]
    }

    /// Resolve a handle
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Resolve a handle mutably
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Update every entity in creation order, inactive ones included
    pub fn update(&mut self) {
        log::trace!("Updating {} entities", self.order.len());
        for id in &self.order {
            if let Some(entity) = self.entities.get_mut(*id) {
                entity.update();
            }
        }
    }

    /// Draw every entity in creation order, inactive ones included
    pub fn draw(&mut self) {
        for id in &self.order {
            if let Some(entity) = self.entities.get_mut(*id) {
                entity.draw();
            }
        }
    }

    /// Remove every inactive entity, keeping the survivors' order
    ///
    /// Returns how many entities were removed. This is the only place
    /// entities are dropped.
    pub fn refresh(&mut self) -> usize {
        let entities = &mut self.entities;
        let before = self.order.len();
        self.order.retain(|&id| {
            let keep = entities.get(id).is_some_and(Entity::is_active);
            if !keep {
                entities.remove(id);
            }
            keep
        });

        let removed = before - self.order.len();
        if removed > 0 {
            log::debug!(
                "Refresh removed {} entities ({} remaining)",
                removed,
                self.order.len()
            );
        }
        removed
    }

    /// Number of owned entities, destroyed-but-not-refreshed ones included
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the manager owns no entity
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entity handles in sweep order
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Entities in sweep order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        label: &'static str,
        journal: Journal,
    }

    impl Component for Probe {
        fn update(&mut self) {
            self.journal.borrow_mut().push(format!("u:{}", self.label));
        }

        fn draw(&mut self) {
            self.journal.borrow_mut().push(format!("d:{}", self.label));
        }
    }

    fn spawn(manager: &mut Manager, label: &'static str, journal: &Journal) -> EntityId {
        let entity = manager.add_entity();
        entity
            .add_component(Probe {
                label,
                journal: Rc::clone(journal),
            })
            .unwrap();
        entity.id()
    }

    #[test]
    fn test_add_entity_is_active() {
        let mut manager = Manager::new();
        let id = manager.add_entity().id();
        assert_eq!(manager.len(), 1);
        assert!(manager.entity(id).unwrap().is_active());
    }

    #[test]
    fn test_sweeps_follow_creation_order() {
        let journal = Journal::default();
        let mut manager = Manager::new();
        for label in ["a", "b", "c"] {
            spawn(&mut manager, label, &journal);
        }

        manager.update();
        manager.draw();
        assert_eq!(
            *journal.borrow(),
            vec!["u:a", "u:b", "u:c", "d:a", "d:b", "d:c"]
        );
    }

    #[test]
    fn test_refresh_removes_only_inactive() {
        let journal = Journal::default();
        let mut manager = Manager::new();
        let ids: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|label| spawn(&mut manager, label, &journal))
            .collect();

        manager.entity_mut(ids[1]).unwrap().destroy();
        manager.entity_mut(ids[3]).unwrap().destroy();

        assert_eq!(manager.refresh(), 2);
        assert_eq!(manager.ids(), &[ids[0], ids[2], ids[4]]);
        assert!(manager.entity(ids[1]).is_none());
        assert!(manager.entity(ids[3]).is_none());
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut manager = Manager::new();
        let first = manager.add_entity().id();
        manager.add_entity().destroy();
        let last = manager.add_entity().id();

        assert_eq!(manager.refresh(), 1);
        assert_eq!(manager.refresh(), 0);
        assert_eq!(manager.ids(), &[first, last]);
    }

    #[test]
    fn test_destroyed_entity_sweeps_until_refresh() {
        let journal = Journal::default();
        let mut manager = Manager::new();
        spawn(&mut manager, "a", &journal);
        let b = spawn(&mut manager, "b", &journal);

        manager.entity_mut(b).unwrap().destroy();
        manager.update();
        assert_eq!(*journal.borrow(), vec!["u:a", "u:b"]);

        journal.borrow_mut().clear();
        manager.refresh();
        manager.update();
        assert_eq!(*journal.borrow(), vec!["u:a"]);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut manager = Manager::new();
        let old = manager.add_entity().id();
        manager.entity_mut(old).unwrap().destroy();
        manager.refresh();

        let new = manager.add_entity().id();
        assert_ne!(old, new);
        assert!(manager.entity(old).is_none());
        assert!(manager.entity(new).is_some());
    }

    #[test]
    fn test_empty_manager() {
        let mut manager = Manager::default();
        assert!(manager.is_empty());
        assert_eq!(manager.refresh(), 0);
        manager.update();
        manager.draw();
        assert_eq!(manager.iter().count(), 0);
    }
}

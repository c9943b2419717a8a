//! Entity implementation
//!
//! An entity owns its components in attachment order and keeps two parallel
//! lookup structures for O(1) typed access: a slot array indexed by
//! [`ComponentId`] and a [`ComponentMask`] marking populated slots. Bit `i` of
//! the mask is set exactly when slot `i` holds an index into the owned list.

use std::any::type_name;

use super::component::{downcast_mut, downcast_ref};
use super::registry::{ComponentId, ComponentMask, TypeRegistry, MAX_COMPONENTS};
use super::{Component, EcsError};

slotmap::new_key_type! {
    /// Generational handle to an entity owned by a [`Manager`](super::Manager)
    ///
    /// Once the entity is removed by a refresh pass the handle never resolves
    /// again, even if its slot gets reused.
    pub struct EntityId;
}

/// A typed container of at most one component per concrete type
pub struct Entity {
    id: EntityId,
    active: bool,
    components: Vec<Box<dyn Component>>,
    slots: [Option<usize>; MAX_COMPONENTS],
    mask: ComponentMask,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            active: true,
            components: Vec::new(),
            slots: [None; MAX_COMPONENTS],
            mask: ComponentMask::new(),
        }
    }

    /// Handle of this entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attach `component`, run its `init` hook and return it
    ///
    /// Fails with [`EcsError::DuplicateComponentType`] if a `T` is already
    /// attached and with [`EcsError::TypeCapacityExceeded`] if `T` cannot be
    /// registered. The entity is left untouched on failure.
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<&mut T, EcsError> {
        let id = TypeRegistry::global().id_for::<T>()?;

        if self.mask.contains(id) {
            log::warn!(
                "Entity {:?} already has a `{}`, rejecting duplicate",
                self.id,
                type_name::<T>()
            );
            return Err(EcsError::DuplicateComponentType {
                type_name: type_name::<T>(),
            });
        }

        let index = self.components.len();
        self.components.push(Box::new(component));
        self.slots[id.index()] = Some(index);
        self.mask.insert(id);

        let owner = self.id;
        let attached = self.components[index].as_mut();
        attached.init(owner);
        log::trace!("Attached `{}` to entity {:?}", attached.name(), owner);

        downcast_mut::<T>(attached).ok_or(EcsError::ComponentNotFound {
            type_name: type_name::<T>(),
        })
    }

    /// Whether a `T` is attached
    pub fn has_component<T: Component>(&self) -> bool {
        TypeRegistry::global()
            .lookup::<T>()
            .is_some_and(|id| self.mask.contains(id))
    }

    /// Borrow the attached `T`
    pub fn get_component<T: Component>(&self) -> Result<&T, EcsError> {
        self.slot_of::<T>()
            .and_then(|index| downcast_ref::<T>(self.components[index].as_ref()))
            .ok_or(EcsError::ComponentNotFound {
                type_name: type_name::<T>(),
            })
    }

    /// Mutably borrow the attached `T`
    pub fn get_component_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        let component = match self.slot_of::<T>() {
            Some(index) => downcast_mut::<T>(self.components[index].as_mut()),
            None => None,
        };
        component.ok_or(EcsError::ComponentNotFound {
            type_name: type_name::<T>(),
        })
    }

    fn slot_of<T: Component>(&self) -> Option<usize> {
        let id: ComponentId = TypeRegistry::global().lookup::<T>()?;
        if self.mask.contains(id) {
            self.slots[id.index()]
        } else {
            None
        }
    }

    /// Number of owned components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Presence mask of attached component types
    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Run `update` on every component in attachment order
    ///
    /// Runs regardless of the active flag.
    pub fn update(&mut self) {
        for component in &mut self.components {
            component.update();
        }
    }

    /// Run `draw` on every component in attachment order
    pub fn draw(&mut self) {
        for component in &mut self.components {
            component.draw();
        }
    }

    /// Whether the entity survives the next refresh pass
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the entity for removal at the next refresh pass
    ///
    /// One-way; calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.active {
            log::debug!("Entity {:?} scheduled for removal", self.id);
            self.active = false;
        }
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("active", &self.active)
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("mask", &format_args!("{:#034b}", self.mask.bits()))
            .finish()
    }
}

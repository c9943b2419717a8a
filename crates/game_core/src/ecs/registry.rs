//! Component type registry
//!
//! Every concrete component type gets a small integer on first use. The
//! integer indexes the per-entity slot array and presence mask, so the number
//! of distinct types is capped at [`MAX_COMPONENTS`].
//!
//! Identifiers are drawn from one counter shared by all types and only mean
//! something inside the running process.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

use super::EcsError;

/// Number of distinct component types an entity can index
pub const MAX_COMPONENTS: usize = 32;

/// Registry-assigned identifier of a component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Slot index backing this identifier
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
struct RegistryState {
    ids: HashMap<TypeId, ComponentId>,
    next: usize,
}

/// Maps component types to [`ComponentId`]s
pub struct TypeRegistry {
    state: Mutex<RegistryState>,
    capacity: usize,
}

impl TypeRegistry {
    /// Create an empty registry with the full [`MAX_COMPONENTS`] capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMPONENTS)
    }

    /// Create an empty registry holding at most `capacity` types
    ///
    /// The capacity is clamped to [`MAX_COMPONENTS`]; an id past the slot
    /// array would never be usable.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            capacity: capacity.min(MAX_COMPONENTS),
        }
    }

    /// The process-wide registry used by [`Entity`](super::Entity)
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Identifier for `T`, registering it on first request
    ///
    /// A failed registration does not consume an identifier.
    pub fn id_for<T: 'static>(&self) -> Result<ComponentId, EcsError> {
        let mut state = self.state.lock();
        if let Some(&id) = state.ids.get(&TypeId::of::<T>()) {
            return Ok(id);
        }

        if state.next >= self.capacity {
            log::error!(
                "Component type registry full ({} types), rejecting `{}`",
                self.capacity,
                type_name::<T>()
            );
            return Err(EcsError::TypeCapacityExceeded {
                type_name: type_name::<T>(),
                capacity: self.capacity,
            });
        }

        let id = ComponentId(state.next);
        state.next += 1;
        state.ids.insert(TypeId::of::<T>(), id);
        log::debug!("Registered component type `{}` as {}", type_name::<T>(), id);
        Ok(id)
    }

    /// Identifier for `T` if it was registered already
    pub fn lookup<T: 'static>(&self) -> Option<ComponentId> {
        self.state.lock().ids.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.state.lock().next
    }

    /// Whether no type has been registered yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of types this registry accepts
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Presence bitset over component slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentMask(u32);

impl ComponentMask {
    /// Empty mask
    pub const fn new() -> Self {
        Self(0)
    }

    /// Set the bit for `id`
    pub fn insert(&mut self, id: ComponentId) {
        self.0 |= 1 << id.index();
    }

    /// Clear the bit for `id`
    pub fn remove(&mut self, id: ComponentId) {
        self.0 &= !(1 << id.index());
    }

    /// Whether the bit for `id` is set
    pub const fn contains(self, id: ComponentId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    /// Number of set bits
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;
    struct Gamma;

    #[test]
    fn test_same_type_same_id() {
        let registry = TypeRegistry::new();
        let first = registry.id_for::<Alpha>().unwrap();
        let second = registry.id_for::<Alpha>().unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_come_from_one_counter() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.id_for::<Beta>().unwrap().index(), 0);
        assert_eq!(registry.id_for::<Alpha>().unwrap().index(), 1);
        assert_eq!(registry.id_for::<Gamma>().unwrap().index(), 2);
        assert_eq!(registry.id_for::<Beta>().unwrap().index(), 0);
    }

    #[test]
    fn test_lookup_does_not_register() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.lookup::<Alpha>(), None);
        assert!(registry.is_empty());

        let id = registry.id_for::<Alpha>().unwrap();
        assert_eq!(registry.lookup::<Alpha>(), Some(id));
    }

    #[test]
    fn test_capacity_exceeded_fails_fast() {
        let registry = TypeRegistry::with_capacity(2);
        registry.id_for::<Alpha>().unwrap();
        registry.id_for::<Beta>().unwrap();

        let err = registry.id_for::<Gamma>().unwrap_err();
        assert_eq!(
            err,
            EcsError::TypeCapacityExceeded {
                type_name: type_name::<Gamma>(),
                capacity: 2,
            }
        );

        // Failure is sticky and does not disturb existing ids
        assert!(registry.id_for::<Gamma>().is_err());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id_for::<Beta>().unwrap().index(), 1);
    }

    #[test]
    fn test_capacity_is_clamped() {
        let registry = TypeRegistry::with_capacity(100);
        assert_eq!(registry.capacity(), MAX_COMPONENTS);
    }

    #[test]
    fn test_mask_bits() {
        let registry = TypeRegistry::new();
        let a = registry.id_for::<Alpha>().unwrap();
        let b = registry.id_for::<Beta>().unwrap();

        let mut mask = ComponentMask::new();
        assert!(mask.is_empty());
        mask.insert(b);
        assert!(mask.contains(b));
        assert!(!mask.contains(a));
        assert_eq!(mask.bits(), 0b10);

        mask.insert(a);
        assert_eq!(mask.count(), 2);
        mask.remove(b);
        assert!(!mask.contains(b));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_highest_slot_fits_mask() {
        let mut mask = ComponentMask::new();
        mask.insert(ComponentId(MAX_COMPONENTS - 1));
        assert!(mask.contains(ComponentId(MAX_COMPONENTS - 1)));
        assert_eq!(mask.bits(), 1 << 31);
    }
}

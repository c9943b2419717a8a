//! Component trait
//!
//! A component is a unit of behaviour owned by exactly one entity. The entity
//! drives its hooks: `init` once when attached, then `update` and `draw` once
//! per tick, in that order across the whole population.

use std::any::Any;

use super::EntityId;

/// Downcasting support for boxed components
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour unit attached to an entity
///
/// All hooks default to doing nothing.
///
/// ```
/// use game_core::ecs::{Component, EntityId};
///
/// #[derive(Default)]
/// struct Ticks {
///     owner: Option<EntityId>,
///     count: u32,
/// }
///
/// impl Component for Ticks {
///     fn init(&mut self, owner: EntityId) {
///         self.owner = Some(owner);
///     }
///
///     fn update(&mut self) {
///         self.count += 1;
///     }
/// }
/// ```
pub trait Component: AsAny {
    /// Called once, right after the component is attached
    ///
    /// `owner` is a non-owning handle back to the entity; keep it if needed.
    fn init(&mut self, owner: EntityId) {
        let _ = owner;
    }

    /// Called once per tick
    fn update(&mut self) {}

    /// Called once per tick, after every entity has been updated
    fn draw(&mut self) {}

    /// Name used in log output
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Downcast a type-erased component
pub(crate) fn downcast_ref<T: Component>(component: &dyn Component) -> Option<&T> {
    component.as_any().downcast_ref::<T>()
}

/// Downcast a type-erased component mutably
pub(crate) fn downcast_mut<T: Component>(component: &mut dyn Component) -> Option<&mut T> {
    component.as_any_mut().downcast_mut::<T>()
}

//! ECS error types

use thiserror::Error;

/// Errors raised by the entity/component container
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// More distinct component types were registered than the slot array holds
    #[error("Component type capacity exceeded: cannot register `{type_name}`, all {capacity} slots are taken")]
    TypeCapacityExceeded {
        /// Type that failed to register
        type_name: &'static str,
        /// Registry capacity at the time of the failure
        capacity: usize,
    },

    /// Typed lookup for a component the entity does not have
    #[error("Component not found: `{type_name}` is not attached to this entity")]
    ComponentNotFound {
        /// Requested component type
        type_name: &'static str,
    },

    /// A second instance of an already attached component type
    #[error("Duplicate component type: `{type_name}` is already attached to this entity")]
    DuplicateComponentType {
        /// Rejected component type
        type_name: &'static str,
    },

    /// Entity handle no longer resolves (removed by a refresh pass)
    #[error("Entity not found")]
    EntityNotFound,
}

//! Entity-Component container
//!
//! Ownership is a strict tree: [`Manager`] owns [`Entity`] values, each entity
//! owns its [`Component`]s. Components only hold a non-owning [`EntityId`]
//! back to their entity. Everything runs on the calling thread.

pub mod component;
pub mod entity;
pub mod error;
pub mod manager;
pub mod registry;

pub use component::{AsAny, Component};
pub use entity::{Entity, EntityId};
pub use error::EcsError;
pub use manager::Manager;
pub use registry::{ComponentId, ComponentMask, TypeRegistry, MAX_COMPONENTS};

//! # Game Core
//!
//! A small entity/component container and a fixed-rate game loop for 2D games.
//!
//! ## Features
//!
//! - **Entity/Component container**: entities own behaviour components with
//!   O(1) typed lookup and deferred removal
//! - **Game loop**: event polling, update and draw phases at a capped frame rate
//! - **Configuration**: TOML or RON engine settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use game_core::prelude::*;
//!
//! struct Spin(u32);
//!
//! impl Component for Spin {
//!     fn update(&mut self) {
//!         self.0 += 1;
//!     }
//! }
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.manager_mut().add_entity().add_component(Spin(0))?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     Engine::run(config, &mut MyGame, &mut NoEvents)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod application;
pub mod config;
pub mod ecs;
pub mod engine;
pub mod events;
pub mod foundation;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        application::{AppError, AppEvent, Application},
        config::{Config, ConfigError},
        ecs::{Component, EcsError, Entity, EntityId, Manager},
        engine::{Engine, EngineConfig, EngineError},
        events::{EventSource, NoEvents, ScriptedEvents},
    };
}
